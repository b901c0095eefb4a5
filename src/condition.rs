//! Mailbox conditions for [`Wait::until`](crate::Wait::until)
//!
//! A condition holds a query and a truth test over its result. It
//! keeps no state between evaluations: every check runs the query
//! again against the live mailbox.

use crate::client::MailboxClient;
use crate::error::Result;
use crate::provider::MailProvider;
use crate::query::Query;
use std::future::Future;

pub trait Condition: Sync {
    /// Evaluate the condition against the current mailbox state.
    fn check<P: MailProvider>(
        &self,
        client: &MailboxClient<P>,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Human readable description, used in timeout errors.
    fn describe(&self) -> String;
}

/// True once at least one message from `address` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFrom {
    address: String,
}

impl EmailFrom {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Condition for EmailFrom {
    async fn check<P: MailProvider>(&self, client: &MailboxClient<P>) -> Result<bool> {
        let query = Query::latest().from(self.address.as_str());
        Ok(!client.list_messages(&query).await?.is_empty())
    }

    fn describe(&self) -> String {
        format!("email from {}", self.address)
    }
}

/// True once `query` lists at least one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatches {
    query: Query,
}

impl QueryMatches {
    #[must_use]
    pub const fn new(query: Query) -> Self {
        Self { query }
    }
}

impl Condition for QueryMatches {
    async fn check<P: MailProvider>(&self, client: &MailboxClient<P>) -> Result<bool> {
        Ok(!client.list_messages(&self.query).await?.is_empty())
    }

    fn describe(&self) -> String {
        format!("messages matching {}", self.query)
    }
}

/// Shorthand for [`EmailFrom::new`].
#[must_use]
pub fn email_from(address: impl Into<String>) -> EmailFrom {
    EmailFrom::new(address)
}
