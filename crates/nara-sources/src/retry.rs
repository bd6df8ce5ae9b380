//! Retry with exponential backoff for transient source errors.
//!
//! One outbound call is attempted, and on a retryable error (429, 5xx,
//! transport failure) the wrapper sleeps `retry_delay * 2^attempt` and tries
//! again, up to `max_retries` retries. Terminal errors propagate at once.
//! There is no jitter, no delay cap, and no overall deadline.

use std::future::Future;
use std::time::Duration;

use nara_config::CoreApiConfig;

use crate::error::Retryable;

/// How many times to retry and how long to wait first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles on every retry after that.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl From<&CoreApiConfig> for RetryPolicy {
    fn from(config: &CoreApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Wait before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.retry_delay.saturating_mul(factor)
    }

    /// Run `operation` until it succeeds, fails terminally, or retries run out.
    ///
    /// `label` names the call in log lines.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error, or the last retryable error
    /// once `max_retries` retries have been spent.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        label,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "request failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    if error.is_retryable() {
                        tracing::error!(label, max_retries = self.max_retries, %error, "max retries reached");
                    }
                    return Err(error);
                }
            }
        }
    }
}
