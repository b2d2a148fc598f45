//! Client-side rate limiting for provider requests.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

/// Per-provider rate limiter.
///
/// Limits throughput to a configurable number of requests per second by
/// combining a single-permit [`Semaphore`] with a fixed sleep interval.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    interval: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter` that allows at most
    /// `requests_per_second` requests per second. Zero is treated as one.
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = u64::from(requests_per_second.max(1));
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            interval: Duration::from_millis(1000 / per_second),
        }
    }

    /// The minimum spacing between two requests.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a request slot is available, then holds the slot for
    /// the configured interval.
    pub async fn acquire(&self) {
        // The semaphore is never closed, so `acquire` only fails if that
        // changes; in that case requests simply go unthrottled.
        let _permit = self.semaphore.acquire().await.ok();
        sleep(self.interval).await;
    }
}
