//! Artificial latency applied before each simulated repository call.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the calling task to emulate I/O latency.
#[async_trait]
pub trait LatencySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl LatencySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately, for tests and latency-free runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl LatencySleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Await `sleeper` for `latency`, skipping the call entirely when it is zero.
pub(super) async fn emulate(sleeper: &dyn LatencySleeper, latency: Duration) {
    if !latency.is_zero() {
        sleeper.sleep(latency).await;
    }
}
