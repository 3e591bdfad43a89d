//! Per-request pacing for lookup workers
//!
//! Each lookup waits `1 / requests_per_second` plus a random jitter before it
//! is issued. The wait happens while the worker holds its gate permit, so the
//! overall throughput is about `max_concurrent_requests / (base_delay + jitter)`.

use rand::Rng;
use std::time::Duration;

/// Rate limiter applying base delay plus jitter
#[derive(Debug, Clone)]
pub struct RateLimiter {
    base_delay: Duration,
    max_jitter: Duration,
}

impl RateLimiter {
    pub fn new(base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            base_delay,
            max_jitter,
        }
    }

    /// Delay for the next request: base delay plus jitter in `[0, max_jitter)`
    pub fn next_delay(&self) -> Duration {
        if self.max_jitter.is_zero() {
            return self.base_delay;
        }

        let max_nanos = u64::try_from(self.max_jitter.as_nanos()).unwrap_or(u64::MAX);
        let jitter_nanos = rand::thread_rng().gen_range(0..max_nanos);
        self.base_delay.saturating_add(Duration::from_nanos(jitter_nanos))
    }

    /// Sleep before issuing a request
    pub async fn wait(&self) {
        let delay = self.next_delay();
        tracing::trace!("Rate limiting: waiting {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }
}
