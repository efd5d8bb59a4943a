//! Deadline-based periodic tick source.
//!
//! The ticker owns no thread. The host loop asks it whether a firing is due;
//! a cancelled ticker never reports one, so cancellation takes effect the
//! moment [`Ticker::cancel`] returns.

use std::time::{Duration, Instant};

/// Default tick cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One-shot-per-interval timer.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Schedule the first firing one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarm. Pending firings are dropped.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Whether the ticker is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next firing is due, if armed.
    #[must_use]
    pub const fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Time left until the next firing; zero when overdue, `None` when disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Report a firing if one is due and schedule the next.
    ///
    /// At most one firing is reported per call. When the host fell behind by
    /// more than one interval the schedule restarts from `now` instead of
    /// replaying the missed firings.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }
}
