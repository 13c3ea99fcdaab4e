//! Synchronisation with the remote quote endpoint.
//!
//! - `reconcile` — the id-based merge of a remote record set into the local list.
//! - `client` — TCP client for the endpoint (`FETCH` / `POST`).
//! - `engine` — one sync round (fetch, merge, persist, re-render, notify) and the
//!   periodic polling loop built on top of it.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub mod client;
pub mod engine;
pub mod reconcile;

pub use client::{RemoteSource, SyncClient};
pub use engine::SyncEngine;
pub use reconcile::{Conflict, Resolution, SyncReport, reconcile};

/// How a conflicting remote record is resolved.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SyncStrategy {
    /// The remote copy always replaces the local one.
    #[default]
    ServerWins,
    /// The remote copy replaces the local one only if its `updatedAt` is newer.
    LastWriteWins,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn strategy_names_are_kebab_case() {
        assert_eq!(SyncStrategy::LastWriteWins.to_string(), "last-write-wins");
        assert_eq!(
            <SyncStrategy as FromStr>::from_str("Server-Wins").unwrap(),
            SyncStrategy::ServerWins
        );
        let json = serde_json::to_string(&SyncStrategy::LastWriteWins).unwrap();
        assert_eq!(json, "\"last-write-wins\"");
    }
}
