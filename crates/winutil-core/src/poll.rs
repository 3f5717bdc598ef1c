//! Timeout-bounded polling.
//!
//! [`poll_until`] is the one retry primitive in the crate: run a probe at a
//! fixed interval until it yields a value or the deadline fires. Expiry is
//! not an error; it is reported as `None` so callers can map it to their
//! own sentinel.

use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// Interval and deadline of one poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn from_millis(interval_ms: u64, timeout_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(interval_ms),
            Duration::from_millis(timeout_ms),
        )
    }

    /// Same interval, different deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_TIMEOUT)
    }
}

/// Poll `probe` until it returns `Some` or `policy.timeout` elapses.
///
/// The probe runs immediately, then once per interval. A zero timeout still
/// probes at least once. Returns `None` when the deadline fires, never earlier.
pub async fn poll_until<T, F>(policy: PollPolicy, mut probe: F) -> Option<T>
where
    F: FnMut() -> Option<T>,
{
    // tokio panics on a zero period
    let period = policy.interval.max(Duration::from_millis(1));

    let polling = async {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Some(value) = probe() {
                return value;
            }
        }
    };

    timeout(policy.timeout, polling).await.ok()
}
