//! Error types for gmail-assert

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gmail API error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Token refresh failed: {0}")]
    Auth(String),

    #[error("Message not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Expectation(String),

    #[error("No matches found for {pattern}")]
    NoMatch { pattern: String },

    #[error("Timed out after {}s waiting for {condition}", timeout.as_secs_f64())]
    Timeout { condition: String, timeout: Duration },

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error is a failed test expectation rather than a
    /// problem talking to the mailbox.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Expectation(_) | Self::NoMatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
