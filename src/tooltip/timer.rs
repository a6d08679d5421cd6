//! Cancellable deadlines owned by a single controller
//!
//! The UI loop is tick-driven, so a timer is just a deadline that the owner
//! polls. Clearing the slot is the cancellation: nothing can fire after that.

use std::time::{Duration, Instant};

/// A single pending deadline, or nothing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the slot to fire `after` from `now`, replacing any pending deadline
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed
    ///
    /// Returns true exactly once per arming.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
