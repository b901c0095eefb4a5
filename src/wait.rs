//! Polling until a mailbox condition holds
//!
//! ```ignore
//! Wait::new(Duration::from_secs(20), Duration::from_millis(1000))
//!     .until(&client, &email_from("test@gmail.com"))
//!     .await?;
//! ```

use crate::client::MailboxClient;
use crate::condition::Condition;
use crate::error::{Error, Result};
use crate::provider::MailProvider;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Timing parameters for a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_INTERVAL)
    }
}

impl Wait {
    #[must_use]
    pub const fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Evaluate `condition` until it returns true or `timeout` elapses.
    ///
    /// The first evaluation happens immediately. After each failed
    /// evaluation the caller sleeps for `interval`; evaluations never
    /// overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] naming the condition if it never
    /// held, or the first error raised while evaluating it.
    pub async fn until<P, C>(&self, client: &MailboxClient<P>, condition: &C) -> Result<()>
    where
        P: MailProvider,
        C: Condition,
    {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if condition.check(client).await? {
                info!(
                    "Condition met after {} attempt(s): {}",
                    attempts,
                    condition.describe()
                );
                return Ok(());
            }
            debug!("Attempt {} not satisfied: {}", attempts, condition.describe());

            sleep(self.interval).await;

            if start.elapsed() >= self.timeout {
                let description = condition.describe();
                warn!("Timed out waiting for {}", description);
                return Err(Error::Timeout {
                    condition: description,
                    timeout: self.timeout,
                });
            }
        }
    }
}
