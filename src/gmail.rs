//! Gmail REST API provider
//!
//! Talks to the OAuth token endpoint and the `users.messages` list/get
//! endpoints. Response JSON is converted into the typed
//! [`Message`] tree once, at fetch time.

use crate::config::GmailConfig;
use crate::error::{Error, Result};
use crate::message::{Header, Message, MessageRef, Part};
use crate::provider::MailProvider;
use crate::query::Query;
use crate::session::{Credentials, TokenGrant};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// HTTP client for the Gmail API
#[derive(Debug, Clone)]
pub struct GmailApi {
    http: Client,
    token_url: String,
    api_base: String,
    user: String,
}

impl GmailApi {
    #[must_use]
    pub fn new(config: &GmailConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured `reqwest` client (proxies, timeouts, ...).
    #[must_use]
    pub fn with_client(http: Client, config: &GmailConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            user: config.user.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/users/{}/messages", self.api_base, self.user)
    }
}

impl MailProvider for GmailApi {
    async fn exchange_refresh_token(&self, credentials: &Credentials) -> Result<TokenGrant> {
        debug!("Exchanging refresh token at {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("refresh_token", credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Auth(format!("status={status} body={body}")));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(TokenGrant {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }

    async fn list_messages(&self, access_token: &str, query: &Query) -> Result<Vec<MessageRef>> {
        let mut params = vec![("maxResults", query.max_results.to_string())];
        if let Some(q) = query.search() {
            params.push(("q", q));
        }
        debug!("Listing messages: {}", query);

        let response = self
            .http
            .get(self.messages_url())
            .bearer_auth(access_token)
            .query(&params)
            .send()
            .await?;

        let list: ListResponse = serde_json::from_str(&checked_body(response).await?)?;
        Ok(list
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|stub| MessageRef {
                id: stub.id,
                thread_id: stub.thread_id,
            })
            .collect())
    }

    async fn get_message(&self, access_token: &str, id: &str) -> Result<Message> {
        debug!("Fetching message {}", id);

        let response = self
            .http
            .get(format!("{}/{id}", self.messages_url()))
            .bearer_auth(access_token)
            .query(&[("format", "full")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id.to_string()));
        }

        let raw: RawMessage = serde_json::from_str(&checked_body(response).await?)?;
        Ok(raw.into())
    }
}

async fn checked_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(Error::Provider {
            status: status.as_u16(),
            body,
        })
    }
}

// -- wire types --

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

const fn default_expires_in() -> i64 {
    3600
}

#[derive(Deserialize)]
struct ListResponse {
    messages: Option<Vec<MessageStub>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageStub {
    id: String,
    thread_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    id: String,
    thread_id: Option<String>,
    #[serde(default)]
    payload: RawPart,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<RawHeader>,
    #[serde(default)]
    body: Option<RawBody>,
    #[serde(default)]
    parts: Vec<RawPart>,
}

#[derive(Deserialize)]
struct RawHeader {
    name: Option<String>,
    value: Option<String>,
}

#[derive(Deserialize)]
struct RawBody {
    data: Option<String>,
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        Self {
            id: raw.id,
            thread_id: raw.thread_id,
            payload: raw.payload.into(),
        }
    }
}

impl From<RawPart> for Part {
    fn from(raw: RawPart) -> Self {
        Self {
            mime_type: raw.mime_type,
            // Headers missing a name or value can never match a lookup.
            headers: raw
                .headers
                .into_iter()
                .filter_map(|h| Some(Header::new(h.name?, h.value?)))
                .collect(),
            body: raw.body.and_then(|b| b.data),
            parts: raw.parts.into_iter().map(Into::into).collect(),
        }
    }
}
