//! Fixed-rate tick scheduler.
//!
//! Turns wall-clock instants into a count of discrete ticks.  The caller
//! supplies `now`, so the scheduler never sleeps or reads the clock itself
//! and can be driven with synthetic instants in tests.

use std::time::{Duration, Instant};

/// Most ticks run for a single poll.  A longer stall (terminal suspended,
/// debugger) drops the backlog instead of fast-forwarding through it.
pub const MAX_CATCH_UP: u32 = 8;

#[derive(Clone, Debug)]
pub struct Scheduler {
    interval: Duration,
    /// Deadline of the next tick; `None` while stopped.
    next: Option<Instant>,
}

impl Scheduler {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / ticks_per_second.max(1),
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Start ticking one interval after `now`.  Returns false (and changes
    /// nothing) if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.next = Some(now + self.interval);
        true
    }

    /// Stop ticking.  Stopping a stopped scheduler is a no-op.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Time left until the next tick is due, or `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Number of ticks that have come due by `now`, advancing the deadline
    /// past them.  Capped at [`MAX_CATCH_UP`].
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut due = 0;
        while now >= next && due < MAX_CATCH_UP {
            due += 1;
            next += self.interval;
        }
        if now >= next {
            next = now + self.interval;
        }
        self.next = Some(next);
        due
    }
}
