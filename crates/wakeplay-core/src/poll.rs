//! Deadline-based polling shared by every wait in the orchestrator.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::trace;

/// Shortest sleep between two probes, whatever the policy says.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Poll cadence and overall deadline for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl RetryPolicy {
    pub const fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Build from fractional seconds, as written in configuration files.
    ///
    /// Negative or non-finite values collapse to zero.
    pub fn from_secs_f64(poll_interval: f64, timeout: f64) -> Self {
        Self::new(secs(poll_interval), secs(timeout))
    }
}

/// Fractional seconds to a `Duration`; negative or non-finite values become zero.
pub fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

/// Run `probe` until it yields a value or the policy deadline passes.
///
/// The probe runs once immediately, then after every poll interval (never
/// less than [`MIN_POLL_INTERVAL`]). The last sleep is clipped to the
/// deadline, so a miss returns within `timeout` plus the duration of a
/// single probe.
pub async fn poll_until<T, F, Fut>(policy: RetryPolicy, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + policy.timeout;
    let interval = policy.poll_interval.max(MIN_POLL_INTERVAL);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        if let Some(value) = probe().await {
            trace!(attempt, "poll satisfied");
            return Some(value);
        }

        let now = Instant::now();
        if now >= deadline {
            trace!(attempt, "poll deadline reached");
            return None;
        }
        sleep(interval.min(deadline - now)).await;
    }
}
