//! Bounded retry for NCBI requests
//!
//! A failed request is repeated a fixed number of times at a fixed interval
//! (with jitter) when the error is transient. There is no adaptive backoff.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{FixedInterval, jitter};
use tracing::{debug, warn};

/// Errors that know whether repeating the request could succeed
pub trait RetryableError {
    /// Whether the operation that produced this error should be attempted again
    fn is_retryable(&self) -> bool;

    /// Short human-readable reason used in retry logs
    fn retry_reason(&self) -> &str;
}

/// Retry policy for remote calls
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Number of retries after the first attempt
    pub max_retries: usize,
    /// Delay between attempts (jitter is applied on top)
    pub delay: Duration,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }

    /// Disable retries entirely
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> {
        FixedInterval::new(self.delay)
            .map(jitter)
            .take(self.max_retries)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or the
/// configured number of retries is exhausted.
pub async fn with_retry<F, Fut, T, E>(operation: F, config: &RetryConfig, context: &str) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + Display,
{
    let mut attempt = 0usize;
    let max_retries = config.max_retries;

    let result = RetryIf::start(config.strategy(), operation, |err: &E| {
        attempt += 1;
        let retryable = err.is_retryable();
        if retryable && attempt <= max_retries {
            warn!(
                attempt,
                max_retries,
                reason = err.retry_reason(),
                error = %err,
                "{} failed, retrying",
                context
            );
        } else if !retryable {
            debug!(reason = err.retry_reason(), "{} failed permanently", context);
        }
        retryable
    })
    .await;

    if let Err(err) = &result {
        if err.is_retryable() {
            warn!(attempts = attempt, error = %err, "{} gave up after retries", context);
        }
    }

    result
}
