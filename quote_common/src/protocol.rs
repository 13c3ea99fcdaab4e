//! Request/response payloads exchanged between the client and the remote endpoint.
//!
//! Each TCP connection carries exactly one `Request` line from the client and one
//! `Response` line back. Values are JSON objects tagged by `type`.
use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// Message sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Ask for the full remote quote set.
    Fetch,
    /// Submit a quote to the endpoint.
    Post {
        /// The quote being submitted.
        quote: Quote,
    },
}

/// Message sent back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    /// Answer to `Fetch`.
    Quotes {
        /// All remote records.
        quotes: Vec<Quote>,
    },
    /// Answer to `Post`: the quote as the endpoint recorded it.
    Created {
        /// Echoed quote with a server-assigned id.
        quote: Quote,
    },
    /// The request could not be served.
    Error {
        /// Human-readable reason.
        message: String,
    },
}
