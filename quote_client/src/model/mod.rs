//! Client-side data model.
//!
//! - `store` — the in-memory quote list and the operations that mutate it.
//! - `notification` — status messages shown after sync rounds and user actions.
pub mod notification;
pub mod store;
