//! Domain models and utilities for the mock quote endpoint.
//!
//! - `remote_store` — the fixed set of remote quote records served to clients.
//! - `remote_editor` — background thread that edits remote records so that
//!   clients observe conflicting updates.

pub mod remote_editor;
pub mod remote_store;
