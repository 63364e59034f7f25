//! Trailing-edge debounce for store notifications.
//!
//! Each trigger (re)starts a single timer; the action is due once the
//! interval has elapsed without a further trigger. There is never more than
//! one pending action.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Instant>,
    collapsed: u64,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            collapsed: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a notification that happened at `at`, restarting the timer.
    pub fn trigger(&mut self, at: Instant) {
        if self.deadline.is_some() {
            self.collapsed += 1;
            log::trace!("debounce restarted ({} collapsed so far)", self.collapsed);
        }
        let deadline = at + self.interval;
        // Notifications can be drained out of order; keep the latest deadline.
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.max(deadline)));
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending action becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once per burst, when the quiet period is over.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.collapsed = 0;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending action.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.collapsed = 0;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
