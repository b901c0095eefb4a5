//! OAuth session state
//!
//! A [`Session`] is created once per test run and mutated in place
//! whenever the access token is exchanged for a fresh one.

use crate::config::GmailConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, TimeDelta, Utc};

/// Tokens are treated as expired this many seconds before their
/// actual expiry.
pub const EXPIRY_LEEWAY_SECONDS: i64 = 30;

/// Client credentials used to exchange a refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl From<&GmailConfig> for Credentials {
    fn from(config: &GmailConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
        }
    }
}

/// A new access token handed out by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds, counted from the moment of the exchange.
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credentials: Credentials,
    access_token: Option<AccessToken>,
}

impl Session {
    /// A session without an access token. It reports itself as
    /// expired until the first refresh.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            access_token: None,
        }
    }

    /// A session seeded with an already issued access token.
    #[must_use]
    pub const fn with_access_token(credentials: Credentials, access_token: AccessToken) -> Self {
        Self {
            credentials,
            access_token: Some(access_token),
        }
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The current bearer token, or an empty string before the first
    /// refresh.
    #[must_use]
    pub fn bearer(&self) -> &str {
        self.access_token.as_ref().map_or("", |t| t.token.as_str())
    }

    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token.as_ref().is_none_or(|t| {
            t.expires_at
                .checked_sub_signed(Duration::seconds(EXPIRY_LEEWAY_SECONDS))
                .is_none_or(|deadline| deadline <= now)
        })
    }

    /// Replace the access token with one obtained at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the granted lifetime does not fit in
    /// a timestamp. The session is left unchanged in that case.
    pub fn apply_grant(&mut self, grant: TokenGrant, now: DateTime<Utc>) -> Result<()> {
        let expires_at = TimeDelta::try_seconds(grant.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                Error::Auth(format!(
                    "token lifetime out of range: {}s",
                    grant.expires_in
                ))
            })?;

        self.access_token = Some(AccessToken {
            token: grant.access_token,
            expires_at,
        });
        Ok(())
    }
}
