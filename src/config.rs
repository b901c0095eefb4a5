//! Gmail API credentials and endpoints

use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";
pub const DEFAULT_USER: &str = "me";

/// OAuth credentials and API endpoints for one Gmail mailbox
#[derive(Debug, Clone)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: String,
    pub api_base: String,
    pub user: String,
}

impl GmailConfig {
    /// Build a configuration for the public Gmail endpoints.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            user: DEFAULT_USER.to_string(),
        }
    }

    /// Load the configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `GMAIL_CLIENT_ID`
    /// - `GMAIL_CLIENT_SECRET`
    /// - `GMAIL_REFRESH_TOKEN`
    ///
    /// Optional (with defaults):
    /// - `GMAIL_TOKEN_URL` (default: `https://oauth2.googleapis.com/token`)
    /// - `GMAIL_API_BASE` (default: `https://gmail.googleapis.com/gmail/v1`)
    /// - `GMAIL_USER` (default: `me`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            client_id: required("GMAIL_CLIENT_ID")?,
            client_secret: required("GMAIL_CLIENT_SECRET")?,
            refresh_token: required("GMAIL_REFRESH_TOKEN")?,
            token_url: env::var("GMAIL_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            api_base: env::var("GMAIL_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            user: env::var("GMAIL_USER").unwrap_or_else(|_| DEFAULT_USER.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{name} not set")))
}
