//! Request pacing for NCBI E-utilities
//!
//! NCBI allows 3 requests per second without an API key and 10 with one.
//! Every request made by [`PubMedClient`](crate::pubmed::PubMedClient),
//! retries included, takes a permit from a shared [`RateLimiter`] first.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Token bucket shared by all clones of one client
#[derive(Clone)]
pub struct RateLimiter {
    per_second: f64,
    burst: f64,
    state: Arc<Mutex<Bucket>>,
}

struct Bucket {
    permits: f64,
    updated: Instant,
}

impl RateLimiter {
    /// Limiter for `per_second` requests per second.
    ///
    /// Non-positive or non-finite rates fall back to one request per second.
    /// The bucket starts full and holds at least one permit.
    ///
    /// ```
    /// use pharma_papers::rate_limit::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(3.0);
    /// assert_eq!(limiter.per_second(), 3.0);
    /// ```
    pub fn new(per_second: f64) -> Self {
        let per_second = if per_second.is_finite() && per_second > 0.0 {
            per_second
        } else {
            1.0
        };
        let burst = per_second.max(1.0);

        Self {
            per_second,
            burst,
            state: Arc::new(Mutex::new(Bucket {
                permits: burst,
                updated: Instant::now(),
            })),
        }
    }

    pub fn per_second(&self) -> f64 {
        self.per_second
    }

    /// Wait for a permit and take it
    #[instrument(skip(self), fields(per_second = self.per_second))]
    pub async fn acquire(&self) -> crate::Result<()> {
        loop {
            let wait = {
                let mut bucket = self.state.lock().await;
                self.refill(&mut bucket);

                if bucket.permits >= 1.0 {
                    bucket.permits -= 1.0;
                    debug!(remaining = bucket.permits, "Permit granted");
                    return Ok(());
                }

                Duration::from_secs_f64((1.0 - bucket.permits) / self.per_second)
            };

            // Another clone may take the refilled permit first; then wait again
            debug!(wait_ms = wait.as_millis() as u64, "Waiting for permit");
            tokio::time::sleep(wait).await;
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let earned = now.duration_since(bucket.updated).as_secs_f64() * self.per_second;
        bucket.permits = (bucket.permits + earned).min(self.burst);
        bucket.updated = now;
    }
}
