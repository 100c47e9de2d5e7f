use std::time::{Duration, Instant};

/// Coalesces bursts of edits into one rescan.
///
/// There is at most one pending rescan. Every [schedule](RescanScheduler::schedule)
/// pushes it back to a full quiet period after the latest edit, and
/// [poll](RescanScheduler::poll) fires it once that period has passed.
/// The host drives the clock, so this works with any event loop or timer.
#[derive(Debug, Clone)]
pub struct RescanScheduler {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl RescanScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Replaces any pending rescan with one due a quiet period after `now`.
    ///
    /// A quiet period too long to be represented never ends, so nothing is scheduled.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending rescan is due, for hosts that arm a real timer.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per pending rescan, when it is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
