//! Pacing between consecutive marketplace calls.
//!
//! The lookup API allows roughly one request per second per credential set.
//! The fetcher pauses between its calls so a single import never bursts;
//! this is a fixed throttle, not a retry or backoff. There is no
//! cross-import coordination.

use std::time::Duration;

use async_trait::async_trait;

/// Pause policy applied between two marketplace calls of one fetch.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if self.0.is_zero() {
            return;
        }
        tracing::debug!(delay = ?self.0, "pausing between marketplace calls");
        tokio::time::sleep(self.0).await;
    }
}

/// Never pauses. For tests and offline tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}
