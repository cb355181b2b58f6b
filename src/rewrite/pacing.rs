//! Pacing policies applied between generation calls.

use async_trait::async_trait;
use std::time::Duration;

/// Waits between consecutive generation calls to stay under a request-rate budget.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next call may start.
    async fn pace(&self);
}

/// Sleeps for a fixed interval.
#[derive(Debug, Clone)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Pacer for FixedIntervalPacer {
    async fn pace(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pace(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fixed_interval_waits() {
        let pacer = FixedIntervalPacer::from_millis(30);
        let start = Instant::now();
        pacer.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_no_pacing_returns_immediately() {
        let start = Instant::now();
        NoPacing.pace().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
