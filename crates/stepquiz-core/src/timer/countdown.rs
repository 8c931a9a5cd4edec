//! Countdown timer implementation.
//!
//! The countdown is tick-driven. It does not use internal threads -- the
//! caller is responsible for calling `tick()` once per second.
//!
//! ```ignore
//! let mut countdown = Countdown::new(300);
//! countdown.start();
//! // Once per second:
//! countdown.tick(); // Returns true when time runs out
//! ```

use serde::{Deserialize, Serialize};

/// Tick-driven countdown with a second granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    duration_secs: u64,
    remaining_secs: u64,
    armed: bool,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            armed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Remaining time as `MM : SS`, both fields zero-padded.
    pub fn display(&self) -> String {
        let minutes = self.remaining_secs / 60;
        let seconds = self.remaining_secs % 60;
        format!("{minutes:02} : {seconds:02}")
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the countdown. Idempotent: starting again re-arms ticking
    /// without touching the remaining time.
    pub fn start(&mut self) {
        self.armed = true;
    }

    /// Disarm without touching the remaining time.
    pub fn stop(&mut self) {
        self.armed = false;
    }

    /// Restore the full duration and disarm.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.armed = false;
    }

    /// Advance one second. Returns `true` on the tick that reaches zero;
    /// the countdown disarms itself at that point, so remaining time never
    /// goes negative and later ticks are no-ops.
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.armed = false;
            return true;
        }
        false
    }
}
