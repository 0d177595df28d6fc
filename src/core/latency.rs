//! Simulated processing latency
//!
//! Every admitted guarded operation pauses once before applying its effect.
//! The pause is the only suspension point of the background task, and it is
//! pluggable so tests can hold the in-flight window open or skip it.

use crate::types::GuardedOp;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Delay applied by a background task before it touches the balance
#[async_trait]
pub trait Latency: Send + Sync + fmt::Debug {
    async fn pause(&self, op: GuardedOp);
}

/// Sleeps for a fixed duration on the tokio timer
///
/// Works with tokio's paused test clock, so tests using
/// `#[tokio::test(start_paused = true)]` do not wait in real time.
#[derive(Debug, Clone, Copy)]
pub struct SleepLatency(pub Duration);

#[async_trait]
impl Latency for SleepLatency {
    async fn pause(&self, _op: GuardedOp) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Holds every background task until a permit is released
///
/// Used to drive the single-flight window step by step.
#[derive(Debug)]
pub struct GatedLatency {
    gate: Semaphore,
}

impl GatedLatency {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
        }
    }

    /// Let `n` waiting (or future) operations through
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }
}

impl Default for GatedLatency {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Latency for GatedLatency {
    async fn pause(&self, _op: GuardedOp) {
        // The semaphore is never closed, so acquire only fails if it is.
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_latency_advances_clock() {
        let start = Instant::now();

        SleepLatency(Duration::from_secs(2))
            .pause(GuardedOp::AddBalance)
            .await;

        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_gated_latency_waits_for_release() {
        let latency = Arc::new(GatedLatency::new());
        let waiting = Arc::clone(&latency);
        let task = tokio::spawn(async move { waiting.pause(GuardedOp::SubBalance).await });

        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        latency.release(1);
        task.await.unwrap();
    }
}
