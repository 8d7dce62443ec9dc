//! Wait primitives
//!
//! Two synchronization strategies coexist: [`settle`] is the coarse fixed
//! delay the target UI was originally tuned against, and [`PollConfig`]
//! bounds the exponential-backoff readiness polling used when resolving
//! required controls. Neither supports cancellation; the only abort path is
//! process termination.

use std::time::Duration;
use tracing::info;

/// Suspend the current task for a fixed duration
///
/// Logs the requested duration first so CI output shows where time went.
/// Callers accept the usual fixed-delay tradeoff: too short and the next
/// action fails, too long and time is wasted.
pub async fn settle(duration: Duration) {
    info!("waiting {}ms for the page to settle", duration.as_millis());
    tokio::time::sleep(duration).await;
}

/// Bounds for readiness polling
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Give up after this much elapsed time; zero means a single pass
    pub timeout: Duration,
    /// Delay before the second pass
    pub initial_interval: Duration,
    /// Backoff ceiling
    pub max_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            initial_interval: Duration::from_millis(250),
            max_interval: Duration::from_secs(4),
        }
    }
}

impl PollConfig {
    /// A config that probes exactly once and never sleeps
    pub const fn single_pass() -> Self {
        Self {
            timeout: Duration::ZERO,
            initial_interval: Duration::ZERO,
            max_interval: Duration::ZERO,
        }
    }

    /// The interval following `current`, capped at the ceiling
    pub fn next_interval(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_interval)
    }
}
