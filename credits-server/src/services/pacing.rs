//! Outbound call pacing
//!
//! Each kind of upstream call gets its own token bucket (one token per
//! interval, burst of one). Buckets are shared process-wide so concurrent
//! requests together stay under the configured rate.

use credits_common::config::PacingConfig;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Token bucket for one kind of upstream call
pub struct Pacer {
    name: &'static str,
    interval: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl Pacer {
    /// A zero interval yields a pacer that never waits
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self {
            name,
            interval,
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    pub fn disabled(name: &'static str) -> Self {
        Self::new(name, Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Wait until the next call of this kind may go out
    pub async fn pace(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };

        if limiter.check().is_err() {
            debug!(pacer = self.name, interval_ms = self.interval.as_millis() as u64, "Pacing: waiting for next slot");
            limiter.until_ready().await;
        }
    }
}

/// One pacer per upstream call kind
#[derive(Clone)]
pub struct PacingPolicy {
    /// Song lookups while resolving search hits
    pub search_song: Arc<Pacer>,
    /// Per-track credit lookups
    pub track_credits: Arc<Pacer>,
    /// Per-person artist handle lookups
    pub handle_lookup: Arc<Pacer>,
}

impl PacingPolicy {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            search_song: Arc::new(Pacer::new(
                "search_song",
                Duration::from_millis(config.search_song_interval_ms),
            )),
            track_credits: Arc::new(Pacer::new(
                "track_credits",
                Duration::from_millis(config.track_credits_interval_ms),
            )),
            handle_lookup: Arc::new(Pacer::new(
                "handle_lookup",
                Duration::from_millis(config.handle_lookup_interval_ms),
            )),
        }
    }

    pub fn disabled() -> Self {
        Self::from_config(&PacingConfig::disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_zero_interval_disables_pacer() {
        let pacer = Pacer::disabled("test");
        assert!(!pacer.is_enabled());
        assert_eq!(pacer.interval(), Duration::ZERO);
    }

    #[test]
    fn test_policy_from_default_config() {
        let policy = PacingPolicy::from_config(&PacingConfig::default());
        assert_eq!(policy.search_song.interval(), Duration::from_millis(300));
        assert_eq!(policy.track_credits.interval(), Duration::from_millis(500));
        assert_eq!(policy.handle_lookup.interval(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_disabled_pacer_never_waits() {
        let pacer = Pacer::disabled("test");
        let start = Instant::now();

        for _ in 0..100 {
            pacer.pace().await;
        }

        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_pacer_spaces_calls() {
        let pacer = Pacer::new("test", Duration::from_millis(100));
        let start = Instant::now();

        // First call - burst slot, no wait
        pacer.pace().await;
        let first_elapsed = start.elapsed();

        pacer.pace().await;
        pacer.pace().await;
        let third_elapsed = start.elapsed();

        assert!(first_elapsed < Duration::from_millis(50));
        assert!(third_elapsed >= Duration::from_millis(180));
    }
}
