//! Quiet-interval timer
//!
//! The timer is a plain owned value: arming it records a deadline, polling it
//! with the current instant reports whether the deadline has passed. The host
//! event loop supplies time, so nothing here sleeps or spawns.

use std::time::{Duration, Instant};

/// Default quiet interval before a typed query is dispatched
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(300);

/// Last-write-wins debounce timer
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Invalidate the pending deadline, if any
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending timer fires
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per armed period, when `now` has reached
    /// the deadline. The timer is disarmed as it fires.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL)
    }
}
