//! Message listing queries

use std::fmt;

/// Number of messages requested when a query does not say otherwise.
pub const DEFAULT_MAX_RESULTS: u32 = 100;

/// A listing filter: an optional sender plus an upper bound on the
/// number of results.
///
/// The provider always returns the newest messages first, so a bound
/// of 1 selects the most recent matching message.
///
/// # Examples
///
/// ```
/// use gmail_assert::Query;
///
/// let query = Query::latest().from("alerts@example.com");
/// assert_eq!(query.max_results, 1);
/// assert_eq!(query.search().as_deref(), Some("from:alerts@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub max_results: u32,
    pub from: Option<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            from: None,
        }
    }
}

impl Query {
    /// Only the newest message.
    #[must_use]
    pub const fn latest() -> Self {
        Self {
            max_results: 1,
            from: None,
        }
    }

    #[must_use]
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    #[must_use]
    pub const fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// The provider search string, if any filter is set.
    #[must_use]
    pub fn search(&self) -> Option<String> {
        self.from.as_ref().map(|address| format!("from:{address}"))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.search() {
            Some(q) => write!(f, "{q} (max {})", self.max_results),
            None => write!(f, "any (max {})", self.max_results),
        }
    }
}
