//! Injectable Delays
//!
//! Simulated latency goes through [`Sleeper`] so that production code waits
//! on the tokio timer while tests complete immediately.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Something that can suspend the current task for a duration
#[trait_variant::make(Sleeper: Send)]
pub trait LocalSleeper {
    async fn sleep(&self, duration: Duration);
}

/// Real delays on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately and records every requested duration.
///
/// Still yields once per call, so other tasks get a chance to run at the
/// same suspension points as with real delays.
#[derive(Debug, Clone, Default)]
pub struct InstantSleeper {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl InstantSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in call order
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of all requested durations
    pub fn total(&self) -> Duration {
        self.requested().iter().sum()
    }
}

impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        tokio::task::yield_now().await;
    }
}
