//! Quote record shared by the client store and the remote endpoint.
//!
//! A `Quote` is a text with a category label. Records created by the client or
//! served by the remote endpoint also carry a numeric `id` and an `updated_at`
//! millisecond UTC timestamp; both are optional on the wire so that older
//! exports (text and category only) can still be imported.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Category label used when a quote has none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Current UTC time in milliseconds since Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A single quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Numeric identifier, assigned at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The quote itself.
    pub text: String,
    /// Category label.
    #[serde(default = "default_category")]
    pub category: String,
    /// Last modification time, milliseconds since Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Quote {
    /// Creates a new quote stamped with the current time.
    ///
    /// Both fields are trimmed; an empty category falls back to
    /// [`DEFAULT_CATEGORY`]. Empty text is rejected.
    pub fn new(text: &str, category: &str) -> Result<Self, QuoteError> {
        let quote = Quote {
            id: None,
            text: text.trim().to_string(),
            category: category.trim().to_string(),
            updated_at: Some(now_millis()),
        };
        quote.normalized()
    }

    /// Sets the id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Marks the quote as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Some(now_millis());
    }

    /// Timestamp used for last-write-wins comparison; missing counts as 0.
    pub fn timestamp(&self) -> i64 {
        self.updated_at.unwrap_or(0)
    }

    /// True when text and category match, ignoring id and timestamp.
    pub fn same_content(&self, other: &Quote) -> bool {
        self.text == other.text && self.category == other.category
    }

    /// Checks that the text and category are present.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.text.trim().is_empty() {
            return Err(QuoteError::Validation("quote text is required".into()));
        }
        if self.category.trim().is_empty() {
            return Err(QuoteError::Validation("quote category is required".into()));
        }
        Ok(())
    }

    /// Trims the fields, applies the fallback category and validates.
    pub fn normalized(mut self) -> Result<Self, QuoteError> {
        self.text = self.text.trim().to_string();
        self.category = self.category.trim().to_string();
        if self.category.is_empty() {
            self.category = default_category();
        }
        self.validate()?;
        Ok(self)
    }
}
