//! Fake Gmail HTTP server on top of `wiremock`
//!
//! Mounts enough of the OAuth token endpoint and `users.messages` to
//! exercise `GmailApi` end to end:
//!
//! ```text
//!   POST /token                              -> {"access_token": ..., "expires_in": ...}
//!   GET  /gmail/v1/users/me/messages         -> {"messages": [{"id", "threadId"}, ...]}
//!   GET  /gmail/v1/users/me/messages/{id}    -> full message JSON, or 404
//! ```
//!
//! Message endpoints answer 401 unless the request carries
//! `Authorization: Bearer http-token`, the only token `/token` hands
//! out. Every request is recorded by the mock server.

use super::mailbox::Mailbox;
use gmail_assert::{GmailConfig, Message, Part};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{
    any, body_string_contains, header, method, path, path_regex, query_param,
};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "http-token";
pub const TOKEN_LIFETIME: i64 = 3599;
pub const MESSAGES_PATH: &str = "/gmail/v1/users/me/messages";

pub struct FakeGmailServer {
    server: MockServer,
}

impl FakeGmailServer {
    /// Start a mock server serving `mailbox`.
    pub async fn start(mailbox: Mailbox) -> Self {
        let server = MockServer::start().await;
        let bearer = format!("Bearer {ACCESS_TOKEN}");

        // An empty refresh token is rejected before the grant matcher
        // gets a chance.
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("refresh_token=&"))
            .respond_with(invalid_grant())
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("client_id="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": ACCESS_TOKEN,
                "expires_in": TOKEN_LIFETIME,
                "token_type": "Bearer",
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(invalid_grant())
            .with_priority(9)
            .mount(&server)
            .await;

        for email in &mailbox.emails {
            let id = &email.message.id;
            Mock::given(method("GET"))
                .and(path(format!("{MESSAGES_PATH}/{id}")))
                .and(query_param("format", "full"))
                .and(header("Authorization", bearer.as_str()))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(message_json(&email.message)),
                )
                .mount(&server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path(MESSAGES_PATH))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(MessageList {
                mailbox,
                calls: AtomicUsize::new(0),
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(format!("^{MESSAGES_PATH}/[^/]+$")))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": {"code": 404, "message": "Not Found"}})),
            )
            .with_priority(8)
            .mount(&server)
            .await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": {"code": 401}})),
            )
            .with_priority(10)
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A configuration pointing `GmailApi` at this server.
    pub fn config(&self, refresh_token: &str) -> GmailConfig {
        let mut config = GmailConfig::new("test-client", "test-secret", refresh_token);
        config.token_url = self.token_url();
        config.api_base = self.api_base();
        config
    }

    pub fn token_url(&self) -> String {
        format!("{}/token", self.server.uri())
    }

    pub fn api_base(&self) -> String {
        format!("{}/gmail/v1", self.server.uri())
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Answers listing calls from the mailbox, counting calls so that
/// emails scheduled for a later listing show up on time.
struct MessageList {
    mailbox: Mailbox,
    calls: AtomicUsize,
}

impl Respond for MessageList {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let mut max_results = 100;
        let mut from = None;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "maxResults" => max_results = value.parse().unwrap_or(max_results),
                "q" => from = value.strip_prefix("from:").map(str::to_string),
                _ => {}
            }
        }

        let stubs: Vec<Value> = self
            .mailbox
            .list(from.as_deref(), max_results, call)
            .into_iter()
            .map(|e| json!({"id": e.message.id, "threadId": e.message.id}))
            .collect();
        let body = if stubs.is_empty() {
            json!({"resultSizeEstimate": 0})
        } else {
            json!({"messages": stubs, "resultSizeEstimate": stubs.len()})
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}

fn invalid_grant() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"}))
}

fn message_json(message: &Message) -> Value {
    json!({
        "id": message.id,
        "threadId": message.thread_id.clone().unwrap_or_else(|| message.id.clone()),
        "labelIds": ["INBOX"],
        "payload": part_json(&message.payload),
    })
}

fn part_json(part: &Part) -> Value {
    let headers: Vec<Value> = part
        .headers
        .iter()
        .map(|h| json!({"name": h.name, "value": h.value}))
        .collect();
    let body = part.body.as_ref().map_or_else(
        || json!({"size": 0}),
        |data| json!({"size": data.len(), "data": data}),
    );
    let mut value = json!({
        "mimeType": part.mime_type,
        "headers": headers,
        "body": body,
    });
    if !part.parts.is_empty() {
        value["parts"] = part.parts.iter().map(part_json).collect();
    }
    value
}
