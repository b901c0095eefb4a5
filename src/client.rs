//! Authenticated mailbox client

use crate::codec;
use crate::error::Result;
use crate::message::{Message, MessageRef};
use crate::provider::MailProvider;
use crate::query::Query;
use crate::session::Session;
use chrono::Utc;
use std::fmt;
use tracing::{debug, info};

/// Text flavour to pull out of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Plain,
    Html,
}

impl ContentType {
    /// The MIME type a part must carry to match.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Plain => "text/plain",
            Self::Html => "text/html",
        }
    }
}

/// Anything other than `html` selects plain text.
impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s {
            "html" => Self::Html,
            _ => Self::Plain,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Read-only Gmail client holding the OAuth session
///
/// Remote calls use whatever access token the session currently
/// holds. Call [`refresh_if_expired`](Self::refresh_if_expired) at
/// step boundaries to keep it valid; individual calls never refresh
/// on their own.
pub struct MailboxClient<P> {
    provider: P,
    session: Session,
}

impl<P: MailProvider> MailboxClient<P> {
    #[must_use]
    pub const fn new(provider: P, session: Session) -> Self {
        Self { provider, session }
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange the refresh token for a new access token if the
    /// current one has expired. Returns whether an exchange happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the exchange.
    pub async fn refresh_if_expired(&mut self) -> Result<bool> {
        if !self.session.is_expired() {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// Unconditionally exchange the refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the exchange, or
    /// [`Error::Auth`](crate::Error::Auth) if the granted lifetime is
    /// out of range.
    pub async fn refresh(&mut self) -> Result<()> {
        let grant = self
            .provider
            .exchange_refresh_token(self.session.credentials())
            .await?;
        self.session.apply_grant(grant, Utc::now())?;
        info!("Refreshed Gmail access token");
        Ok(())
    }

    /// List message references matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing call fails.
    pub async fn list_messages(&self, query: &Query) -> Result<Vec<MessageRef>> {
        let refs = self
            .provider
            .list_messages(self.session.bearer(), query)
            .await?;
        debug!("Found {} messages matching {}", refs.len(), query);
        Ok(refs)
    }

    /// Fetch the full message with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the
    /// message no longer exists, or another error if the call fails.
    pub async fn fetch_message(&self, id: &str) -> Result<Message> {
        self.provider.get_message(self.session.bearer(), id).await
    }

    /// Fetch the newest message matching `query`, if any.
    ///
    /// Only the first listed reference is fetched, whatever the
    /// query's bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing or fetch call fails.
    pub async fn latest_message(&self, query: &Query) -> Result<Option<Message>> {
        match self.list_messages(query).await?.first() {
            Some(newest) => self.fetch_message(&newest.id).await.map(Some),
            None => Ok(None),
        }
    }
}

/// Decoded body of the first direct child part of type
/// `text/<content_type>`, or an empty string if there is none.
///
/// Only the payload's immediate children are scanned. Text nested
/// inside a multipart child (e.g. `multipart/alternative` within
/// `multipart/mixed`) is not found, and neither is the body of a
/// single-part message.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) if the matching
/// part's body is not valid URL-safe base64.
pub fn get_content(message: &Message, content_type: ContentType) -> Result<String> {
    let Some(part) = message
        .parts()
        .iter()
        .find(|part| part.mime_type == content_type.mime_type())
    else {
        return Ok(String::new());
    };

    let bytes = codec::decode(part.body.as_deref().unwrap_or_default())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Value of the first header named exactly `name`, or an empty string.
#[must_use]
pub fn get_header<'a>(message: &'a Message, name: &str) -> &'a str {
    message
        .headers()
        .iter()
        .find(|header| header.name == name)
        .map_or("", |header| header.value.as_str())
}
