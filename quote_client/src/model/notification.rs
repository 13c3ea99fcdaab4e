//! Status messages shown to the user.
use quote_common::QuoteError;
use strum_macros::Display;

use crate::sync::{SyncReport, SyncStrategy};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A one-line status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(err: &QuoteError) -> Self {
        Self {
            level: Level::Error,
            message: format!("Sync failed: {}", err),
        }
    }

    /// Summarises a sync round. Conflicts raise the level to `Warning`.
    pub fn from_report(report: &SyncReport, strategy: SyncStrategy) -> Self {
        if report.conflicts.is_empty() {
            return Self::info(format!("Quotes synced with server! {}", report.summary()));
        }
        Self::warning(format!(
            "Quotes synced with server! {} conflict(s) resolved using {}. {}",
            report.conflicts.len(),
            strategy,
            report.summary()
        ))
    }
}
