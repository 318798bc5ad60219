//! Awaitable delay port.
//!
//! Every timed wait in the engine (pacing, resolution backoff, settle and
//! highlight delays) goes through [`TempoPort`], so tests can substitute a
//! double that fast-forwards virtual time.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait TempoPort: Send + Sync {
    /// Suspend the current task for `duration`. Exactly one suspension
    /// point per wait.
    async fn sleep(&self, duration: Duration);
}

/// Real-time tempo backed by the tokio timer.
#[derive(Clone, Debug, Default)]
pub struct TokioTempo;

#[async_trait]
impl TempoPort for TokioTempo {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Zero-delay tempo for tests.
#[derive(Clone, Debug, Default)]
pub struct InstantTempo;

#[async_trait]
impl TempoPort for InstantTempo {
    async fn sleep(&self, _duration: Duration) {}
}
