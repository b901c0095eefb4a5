//! Gmail mailbox assertions for end-to-end tests
//!
//! Verifies that expected emails arrived in a Gmail mailbox during
//! automated tests, using the
//! [Gmail API](https://developers.google.com/gmail/api). This is a
//! read-only client: it refreshes an OAuth access token, lists and
//! fetches messages, decodes their text content and polls until a
//! condition over the mailbox holds.
//!
//! Test runners drive [`MailAssertions`], calling
//! [`MailAssertions::before_each_step`] at every step boundary.

mod assertions;
mod client;
pub mod codec;
mod condition;
mod config;
mod error;
mod gmail;
mod message;
mod provider;
mod query;
mod session;
mod wait;

pub use assertions::{DEFAULT_EMAIL_WAIT_TIMEOUT, MailAssertions};
pub use client::{ContentType, MailboxClient, get_content, get_header};
pub use condition::{Condition, EmailFrom, QueryMatches, email_from};
pub use config::GmailConfig;
pub use error::{Error, Result};
pub use gmail::GmailApi;
pub use message::{Header, Message, MessageRef, Part};
pub use provider::MailProvider;
pub use query::{DEFAULT_MAX_RESULTS, Query};
pub use session::{AccessToken, Credentials, Session, TokenGrant};
pub use wait::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, Wait};
