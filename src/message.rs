//! Typed representation of Gmail messages
//!
//! A [`Message`] is built once when it is fetched and never changes
//! afterwards. Its content is a tree of [`Part`]s rooted at the
//! payload; headers are kept in their original order.

use crate::codec;

/// Identifier of a message as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub id: String,
    pub thread_id: Option<String>,
}

impl MessageRef {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One node of a message's content tree.
///
/// Leaf parts carry a URL-safe base64 `body`; multipart containers
/// carry child `parts` instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Part {
    pub mime_type: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
    pub parts: Vec<Self>,
}

impl Part {
    /// A leaf part whose body is `content`, encoded for transport.
    #[must_use]
    pub fn leaf(mime_type: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        Self {
            mime_type: mime_type.into(),
            headers: Vec::new(),
            body: Some(codec::encode(content)),
            parts: Vec::new(),
        }
    }

    /// A container part holding `parts` in order.
    #[must_use]
    pub fn multipart(mime_type: impl Into<String>, parts: Vec<Self>) -> Self {
        Self {
            mime_type: mime_type.into(),
            headers: Vec::new(),
            body: None,
            parts,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<Header>) -> Self {
        self.headers = headers;
        self
    }
}

/// A fully fetched message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub thread_id: Option<String>,
    pub payload: Part,
}

impl Message {
    #[must_use]
    pub fn new(id: impl Into<String>, payload: Part) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
            payload,
        }
    }

    /// Top-level headers of the message, in wire order.
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.payload.headers
    }

    /// Direct child parts of the payload.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.payload.parts
    }
}
