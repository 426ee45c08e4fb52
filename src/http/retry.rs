//! Retry policy with backoff
//!
//! A `RetryPolicy` wraps any async operation returning `crate::Result` and
//! re-runs it while the error is retryable. It is the only place in the
//! crate that sleeps between attempts.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry settings for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count and default backoff
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Calculate backoff delay for a given attempt (0-based)
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Delay before retrying after `error` on `attempt`
    ///
    /// Rate-limit errors wait for the server-provided delay, capped at
    /// `max_backoff`.
    pub fn delay_for(&self, error: &Error, attempt: u32) -> Duration {
        match error {
            Error::RateLimited {
                retry_after_seconds,
            } => std::cmp::min(Duration::from_secs(*retry_after_seconds), self.max_backoff),
            _ => self.calculate_backoff(attempt),
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// retries are exhausted. The last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(&e, attempt);
                    warn!(
                        "Attempt {}/{} failed: {e}, retrying in {:?}",
                        attempt + 1,
                        self.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
