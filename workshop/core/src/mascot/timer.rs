//! Scoped Timers
//!
//! Deferred callbacks expressed against a virtual clock. The mascot never
//! blocks; every "wait" is a deadline that the owning controller checks when
//! the surface advances time.
//!
//! Each timer line holds at most one pending deadline. Arming a line replaces
//! whatever was pending, so a callback armed for a superseded state can never
//! fire against the new one.

use std::time::Duration;

/// A cancellable one-shot deadline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopedTimer {
    deadline: Option<Duration>,
}

impl ScopedTimer {
    /// A timer with nothing pending
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `after` from `now`, cancelling any predecessor
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Cancel the pending deadline (if any)
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if armed
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether a deadline is pending
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it is due at `now`
    ///
    /// Returns `true` exactly once per arming.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A cancellable repeating deadline anchored to the moment it was armed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    next: Option<Duration>,
}

impl IntervalTimer {
    /// Create a stopped interval with the given period
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// (Re)start the cadence so the first tick lands one period after `now`
    pub fn arm(&mut self, now: Duration) {
        self.next = Some(now + self.period);
    }

    /// Stop the interval
    pub fn cancel(&mut self) {
        self.next = None;
    }

    /// Next tick, if running
    pub fn deadline(&self) -> Option<Duration> {
        self.next
    }

    /// Period between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Consume one tick if due at `now`, scheduling the following one
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.next {
            Some(next) if next <= now => {
                self.next = Some(next + self.period);
                true
            }
            _ => false,
        }
    }
}

/// Earliest of several optional deadlines that is due by `limit`
pub(crate) fn earliest_due(deadlines: &[Option<Duration>], limit: Duration) -> Option<Duration> {
    deadlines
        .iter()
        .flatten()
        .copied()
        .filter(|deadline| *deadline <= limit)
        .min()
}
