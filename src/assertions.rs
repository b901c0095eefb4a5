//! Mailbox assertions for end-to-end tests
//!
//! Every assertion inspects the newest message in the mailbox,
//! optionally restricted to one sender. Unmet expectations surface as
//! [`Error::Expectation`] or [`Error::NoMatch`]; anything else is a
//! problem talking to the provider.

use crate::client::{ContentType, MailboxClient, get_content, get_header};
use crate::condition::EmailFrom;
use crate::config::GmailConfig;
use crate::error::{Error, Result};
use crate::gmail::GmailApi;
use crate::message::Message;
use crate::provider::MailProvider;
use crate::query::Query;
use crate::session::{Credentials, Session};
use crate::wait::{DEFAULT_INTERVAL, Wait};
use regex::Regex;
use std::time::Duration;

/// How long [`MailAssertions::wait_for_email_from`] waits when the
/// caller has no better figure.
pub const DEFAULT_EMAIL_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

const SUBJECT: &str = "Subject";

/// Assertion methods over a single Gmail mailbox
///
/// The embedding test runner is expected to call
/// [`before_each_step`](Self::before_each_step) before every test
/// step so that all calls within a step share one valid access
/// token.
pub struct MailAssertions<P> {
    client: MailboxClient<P>,
}

impl MailAssertions<GmailApi> {
    /// Connect to Gmail with the given credentials and obtain a first
    /// access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial token exchange fails.
    pub async fn connect(config: &GmailConfig) -> Result<Self> {
        Self::with_provider(GmailApi::new(config), Credentials::from(config)).await
    }
}

impl<P: MailProvider> MailAssertions<P> {
    #[must_use]
    pub const fn new(client: MailboxClient<P>) -> Self {
        Self { client }
    }

    /// Build assertions over `provider` and obtain a first access
    /// token.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial token exchange fails.
    pub async fn with_provider(provider: P, credentials: Credentials) -> Result<Self> {
        let mut client = MailboxClient::new(provider, Session::new(credentials));
        client.refresh().await?;
        Ok(Self::new(client))
    }

    #[must_use]
    pub const fn client(&self) -> &MailboxClient<P> {
        &self.client
    }

    pub const fn client_mut(&mut self) -> &mut MailboxClient<P> {
        &mut self.client
    }

    /// Step lifecycle hook: refresh the access token if it expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn before_each_step(&mut self) -> Result<()> {
        self.client.refresh_if_expired().await?;
        Ok(())
    }

    /// Assert that the newest message's plain text contains `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if the mailbox is empty or the
    /// text is absent.
    pub async fn see_in_last_email(&self, expected: &str) -> Result<()> {
        let email = self.last_message(None).await?;
        see_in_email(&email, expected)
    }

    /// Assert that the newest message's plain text does not contain
    /// `unexpected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if the mailbox is empty or the
    /// text is present.
    pub async fn dont_see_in_last_email(&self, unexpected: &str) -> Result<()> {
        let email = self.last_message(None).await?;
        dont_see_in_email(&email, unexpected)
    }

    /// Like [`see_in_last_email`](Self::see_in_last_email), for the
    /// newest message from `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if nothing came from `address`
    /// or the text is absent.
    pub async fn see_in_last_email_from(&self, address: &str, expected: &str) -> Result<()> {
        let email = self.last_message(Some(address)).await?;
        see_in_email(&email, expected)
    }

    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if nothing came from `address`
    /// or the text is present.
    pub async fn dont_see_in_last_email_from(&self, address: &str, unexpected: &str) -> Result<()> {
        let email = self.last_message(Some(address)).await?;
        dont_see_in_email(&email, unexpected)
    }

    /// Assert that the newest message's subject contains `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if the mailbox is empty or the
    /// subject does not contain `expected`.
    pub async fn see_in_last_email_subject(&self, expected: &str) -> Result<()> {
        let email = self.last_message(None).await?;
        see_in_email_subject(&email, expected)
    }

    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if the mailbox is empty or the
    /// subject contains `unexpected`.
    pub async fn dont_see_in_last_email_subject(&self, unexpected: &str) -> Result<()> {
        let email = self.last_message(None).await?;
        dont_see_in_email_subject(&email, unexpected)
    }

    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if nothing came from `address`
    /// or the subject does not contain `expected`.
    pub async fn see_in_last_email_subject_from(
        &self,
        address: &str,
        expected: &str,
    ) -> Result<()> {
        let email = self.last_message(Some(address)).await?;
        see_in_email_subject(&email, expected)
    }

    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if nothing came from `address`
    /// or the subject contains `unexpected`.
    pub async fn dont_see_in_last_email_subject_from(
        &self,
        address: &str,
        unexpected: &str,
    ) -> Result<()> {
        let email = self.last_message(Some(address)).await?;
        dont_see_in_email_subject(&email, unexpected)
    }

    /// Return the first match of `pattern` in the newest message's
    /// plain text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] if the pattern does not match,
    /// [`Error::Regex`] if it is invalid, or [`Error::Expectation`] if
    /// the mailbox is empty.
    pub async fn grab_from_last_email(&self, pattern: &str) -> Result<String> {
        let matches = self.grab_matches_from_last_email(pattern).await?;
        first_match(matches, pattern)
    }

    /// # Errors
    ///
    /// See [`grab_from_last_email`](Self::grab_from_last_email).
    pub async fn grab_from_last_email_from(&self, address: &str, pattern: &str) -> Result<String> {
        let matches = self.grab_matches_from_last_email_from(address, pattern).await?;
        first_match(matches, pattern)
    }

    /// Return the whole match of `pattern` followed by its capture
    /// groups. Groups that did not participate are empty strings.
    ///
    /// # Errors
    ///
    /// See [`grab_from_last_email`](Self::grab_from_last_email).
    pub async fn grab_matches_from_last_email(&self, pattern: &str) -> Result<Vec<String>> {
        let email = self.last_message(None).await?;
        grab_matches_from_email(&email, pattern)
    }

    /// # Errors
    ///
    /// See [`grab_from_last_email`](Self::grab_from_last_email).
    pub async fn grab_matches_from_last_email_from(
        &self,
        address: &str,
        pattern: &str,
    ) -> Result<Vec<String>> {
        let email = self.last_message(Some(address)).await?;
        grab_matches_from_email(&email, pattern)
    }

    /// Wait until a message from `address` arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if none arrives within `timeout`.
    pub async fn wait_for_email_from(&self, address: &str, timeout: Duration) -> Result<()> {
        Wait::new(timeout, DEFAULT_INTERVAL)
            .until(&self.client, &EmailFrom::new(address))
            .await
    }

    /// The newest message in the mailbox, or the newest one sent by
    /// `from` when given. Every assertion above inspects this message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Expectation`] if no message matches, or a
    /// provider error if the listing or fetch fails.
    pub async fn last_message(&self, from: Option<&str>) -> Result<Message> {
        let query = from.map_or_else(Query::latest, |address| Query::latest().from(address));
        self.client.latest_message(&query).await?.ok_or_else(|| {
            Error::Expectation(from.map_or_else(
                || "No messages received".to_string(),
                |address| format!("No messages sent to {address}"),
            ))
        })
    }
}

fn see_in_email(email: &Message, expected: &str) -> Result<()> {
    let content = get_content(email, ContentType::Plain)?;
    assert_contains("Email Contains", expected, &content)
}

fn dont_see_in_email(email: &Message, unexpected: &str) -> Result<()> {
    let content = get_content(email, ContentType::Plain)?;
    assert_not_contains("Email Does Not Contain", unexpected, &content)
}

fn see_in_email_subject(email: &Message, expected: &str) -> Result<()> {
    assert_contains("Email Subject Contains", expected, get_header(email, SUBJECT))
}

fn dont_see_in_email_subject(email: &Message, unexpected: &str) -> Result<()> {
    assert_not_contains(
        "Email Subject Does Not Contain",
        unexpected,
        get_header(email, SUBJECT),
    )
}

fn grab_matches_from_email(email: &Message, pattern: &str) -> Result<Vec<String>> {
    let regex = Regex::new(pattern)?;
    let content = get_content(email, ContentType::Plain)?;

    let captures = regex.captures(&content).ok_or_else(|| Error::NoMatch {
        pattern: pattern.to_string(),
    })?;

    Ok(captures
        .iter()
        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
        .collect())
}

fn first_match(matches: Vec<String>, pattern: &str) -> Result<String> {
    matches.into_iter().next().ok_or_else(|| Error::NoMatch {
        pattern: pattern.to_string(),
    })
}

fn assert_contains(label: &str, needle: &str, haystack: &str) -> Result<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(Error::Expectation(format!(
            "{label}: failed asserting that {haystack:?} contains {needle:?}"
        )))
    }
}

fn assert_not_contains(label: &str, needle: &str, haystack: &str) -> Result<()> {
    if haystack.contains(needle) {
        Err(Error::Expectation(format!(
            "{label}: failed asserting that {haystack:?} does not contain {needle:?}"
        )))
    } else {
        Ok(())
    }
}
