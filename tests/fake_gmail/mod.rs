//! Fake Gmail backends for integration testing
//!
//! Two ways to serve the same test mailbox:
//!
//! - `FakeProvider` -- an in-memory `MailProvider`, for driving the
//!   assertions, conditions and poller without any I/O
//! - `FakeGmailServer` -- a `wiremock` server speaking enough of the
//!   OAuth token and `users.messages` endpoints to exercise
//!   `GmailApi` and the CLI end to end
//!
//! ## Module layout
//!
//! - `mailbox` -- test data model (emails, builder)
//! - `provider` -- in-memory provider with call counters
//! - `server` -- mock mounting and JSON rendering of the mailbox

#![allow(dead_code)]

pub mod mailbox;
pub mod server;

pub use mailbox::MailboxBuilder;
pub use provider::FakeProvider;
pub use server::FakeGmailServer;
