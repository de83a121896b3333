//! Trailing-edge debounce driven by caller-supplied time.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Coalesces bursts of requests into one run after a quiet period.
///
/// Each [`Debounce::schedule`] pushes the deadline back; [`Debounce::poll`]
/// reports once when the deadline has passed.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self { wait, deadline: None }
    }

    /// Request a run, restarting the quiet period.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Whether a run is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when a scheduled run is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending run.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
