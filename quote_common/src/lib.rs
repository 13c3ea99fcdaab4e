//!
//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` record exchanged and stored by both sides.
//! - `protocol` — request/response payloads exchanged between client and server.
//! - `net` — networking constants and line framing helpers.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod protocol;
pub mod quote;
pub mod result;

pub use error::QuoteError;
pub use protocol::{Request, Response};
pub use quote::Quote;
pub use result::Result;
