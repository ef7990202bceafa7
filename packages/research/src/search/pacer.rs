//! Process-wide pacing for rate-limited search APIs.
//!
//! The academic API tolerates roughly one request every couple of seconds
//! across the whole process, not per searcher instance. The pacer is an
//! explicitly injected shared limiter: clone it into every academic searcher
//! and they all draw from the same quota.

use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Shared minimum-interval limiter for outbound search requests.
///
/// Guarantees at least the configured interval between the start of one
/// request and the previously recorded one. Enforcement is best-effort
/// under concurrent runs, which is acceptable imprecision for an external
/// courtesy limit.
#[derive(Clone)]
pub struct SearchPacer {
    limiter: Arc<DefaultRateLimiter>,
    interval: Duration,
}

impl SearchPacer {
    /// Create a pacer enforcing `min_interval` between requests.
    pub fn new(min_interval: Duration) -> Self {
        let quota = Quota::with_period(min_interval)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1000u32)));
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            interval: min_interval,
        }
    }

    /// Wait until the minimum interval since the last request has elapsed.
    pub async fn wait(&self) {
        if self.limiter.check().is_err() {
            debug!(interval_ms = self.interval.as_millis() as u64, "pacing before API call");
            self.limiter.until_ready().await;
        }
    }

    /// The configured minimum interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for SearchPacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_pacer_enforces_interval() {
        let pacer = SearchPacer::new(Duration::from_millis(50));

        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        let elapsed = start.elapsed();

        // First call is immediate, the next two wait ~50ms each
        assert!(elapsed >= Duration::from_millis(90), "pacing too fast: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_clones_share_the_quota() {
        let pacer = SearchPacer::new(Duration::from_millis(50));
        let clone = pacer.clone();

        let start = Instant::now();
        pacer.wait().await;
        clone.wait().await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(40), "clone bypassed pacing: {:?}", elapsed);
    }
}
