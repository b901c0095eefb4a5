//! Test data model for the fake Gmail backends
//!
//! Emails are added oldest first; listings return them newest first,
//! the way Gmail does:
//!
//! ```ignore
//! let mailbox = MailboxBuilder::new()
//!     .email("m1", "alice@example.com", "Welcome", "Hello Bob")
//!     .email("m2", "shop@example.com", "Shipped", "Your order #4821 shipped")
//!         .arriving_on_list(3)
//!     .build();
//! ```

use gmail_assert::{Header, Message, Part};

/// Ordered collection of test emails, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Mailbox {
    pub emails: Vec<TestEmail>,
}

/// A test email plus its delivery schedule.
///
/// `arrives_on_list` is the 1-based number of the listing call from
/// which the email becomes visible; 1 means it is there from the
/// start.
#[derive(Debug, Clone)]
pub struct TestEmail {
    pub from: String,
    pub message: Message,
    pub arrives_on_list: usize,
}

impl Mailbox {
    /// Emails visible to the `call`-th listing, newest first, filtered
    /// by sender and truncated to `max_results`.
    pub fn list(&self, from: Option<&str>, max_results: usize, call: usize) -> Vec<&TestEmail> {
        self.emails
            .iter()
            .rev()
            .filter(|e| e.arrives_on_list <= call)
            .filter(|e| from.is_none_or(|address| e.from == address))
            .take(max_results)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&TestEmail> {
        self.emails.iter().find(|e| e.message.id == id)
    }
}

pub struct MailboxBuilder {
    emails: Vec<TestEmail>,
}

impl MailboxBuilder {
    pub fn new() -> Self {
        Self { emails: Vec::new() }
    }

    /// Add a `multipart/alternative` email with an HTML part followed
    /// by a plain text part.
    pub fn email(self, id: &str, from: &str, subject: &str, plain: &str) -> Self {
        let payload = Part::multipart(
            "multipart/alternative",
            vec![
                Part::leaf("text/html", format!("<div>{plain}</div>")),
                Part::leaf("text/plain", plain),
            ],
        )
        .with_headers(vec![
            Header::new("From", from),
            Header::new("To", "qa@example.com"),
            Header::new("Subject", subject),
        ]);
        self.message(from, Message::new(id, payload))
    }

    /// Add an arbitrary message.
    pub fn message(mut self, from: &str, message: Message) -> Self {
        self.emails.push(TestEmail {
            from: from.to_string(),
            message,
            arrives_on_list: 1,
        });
        self
    }

    /// Delay the most recently added email until the `call`-th
    /// listing.
    ///
    /// # Panics
    ///
    /// Panics if called before any email was added.
    pub fn arriving_on_list(mut self, call: usize) -> Self {
        self.emails
            .last_mut()
            .expect("add an email before .arriving_on_list()")
            .arrives_on_list = call;
        self
    }

    pub fn build(self) -> Mailbox {
        Mailbox {
            emails: self.emails,
        }
    }
}
