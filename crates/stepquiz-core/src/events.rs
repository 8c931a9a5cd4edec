use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Slot;
use crate::session::Outcome;

/// Every state change in a session produces an Event.
/// Frontends poll `snapshot()` and render the event stream as it comes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    DragStarted {
        token: String,
        at: DateTime<Utc>,
    },
    DragEnded {
        token: String,
        at: DateTime<Utc>,
    },
    /// An item landed in a slot; `displaced` names the prior occupant
    /// that was evicted to the pool, if there was one.
    ItemPlaced {
        token: String,
        slot: usize,
        displaced: Option<String>,
        at: DateTime<Utc>,
    },
    /// An item went back to the unplaced pool.
    ItemReturned {
        token: String,
        at: DateTime<Utc>,
    },
    /// Submission with unfilled slots; the session stays active.
    SubmissionRejected {
        filled: usize,
        prompt: String,
        at: DateTime<Utc>,
    },
    /// Terminal transition -- from timer expiry or a graded submission.
    SessionEnded {
        outcome: Outcome,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        active: bool,
        remaining_secs: u64,
        display: String,
        dragging: Option<String>,
        pool: Vec<String>,
        slots: Vec<Slot>,
        outcome: Option<Outcome>,
        at: DateTime<Utc>,
    },
}
