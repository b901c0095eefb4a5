//! The remote mail service seen by [`MailboxClient`](crate::MailboxClient)
//!
//! [`GmailApi`](crate::GmailApi) is the production implementation.
//! Anything able to exchange a refresh token, list messages newest
//! first and fetch a full message by id can stand in for it.

use crate::error::Result;
use crate::message::{Message, MessageRef};
use crate::query::Query;
use crate::session::{Credentials, TokenGrant};
use std::future::Future;

pub trait MailProvider: Send + Sync {
    /// Exchange the refresh token in `credentials` for a new access
    /// token.
    fn exchange_refresh_token(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenGrant>> + Send;

    /// List message references matching `query`, newest first.
    fn list_messages(
        &self,
        access_token: &str,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<MessageRef>>> + Send;

    /// Fetch the full message with the given id.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when the
    /// id no longer exists.
    fn get_message(
        &self,
        access_token: &str,
        id: &str,
    ) -> impl Future<Output = Result<Message>> + Send;
}
