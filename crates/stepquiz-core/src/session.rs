//! Session controller.
//!
//! `GameSession` owns all mutable play-through state -- countdown, board,
//! drag state, outcome -- and is mutated only through its handler methods.
//! Every mutating handler checks the active flag first, which makes the
//! ordering of a tick and a user action landing in the same second
//! well-defined: whichever handler runs first wins, and the loser sees a
//! frozen session and early-returns.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::{Board, DragState};
use crate::config::QuizConfig;
use crate::error::{ConfigError, GestureError};
use crate::events::Event;
use crate::timer::Countdown;
use crate::validate::{grade, Verdict};

pub(crate) const TITLE_WIN: &str = "Success";
pub(crate) const TITLE_LOSE: &str = "Failure";
const MSG_WIN: &str = "Congratulations! You arranged the sales process in the correct order.";
const MSG_INCORRECT: &str = "Unfortunately, the process is not correct. Try again!";
const MSG_TIME_EXPIRED: &str = "Time is up! You did not complete the task.";
const PROMPT_FILL_ALL: &str = "Fill every step into the empty slots!";

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub title: String,
    pub message: String,
}

impl Outcome {
    fn new(won: bool, message: &str) -> Self {
        Self {
            won,
            title: if won { TITLE_WIN } else { TITLE_LOSE }.to_string(),
            message: message.to_string(),
        }
    }
}

/// One play-through, from start to terminal outcome or restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    config: QuizConfig,
    countdown: Countdown,
    board: Board,
    #[serde(default)]
    drag: DragState,
    /// `Some` once the session has ended; frozen thereafter.
    #[serde(default)]
    outcome: Option<Outcome>,
}

impl GameSession {
    /// Build a session from validated configuration.
    pub fn new(config: QuizConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let countdown = Countdown::new(config.duration_secs);
        let board = Board::from_config(&config);
        Ok(Self {
            config,
            countdown,
            board,
            drag: DragState::Idle,
            outcome: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.dragging()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            active: self.is_active(),
            remaining_secs: self.countdown.remaining_secs(),
            display: self.countdown.display(),
            dragging: self.drag.dragging().map(str::to_string),
            pool: self.board.pool().to_vec(),
            slots: self.board.slots().to_vec(),
            outcome: self.outcome.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the countdown. Idempotent; does not reset remaining time.
    pub fn start(&mut self) -> Event {
        self.countdown.start();
        Event::SessionStarted {
            duration_secs: self.countdown.duration_secs(),
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second. A tick on an ended session is
    /// a no-op -- no decrement, no event. Reaching zero ends the session
    /// with the time-expired loss.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        if self.countdown.tick() {
            return Some(self.end(false, MSG_TIME_EXPIRED));
        }
        Some(Event::TimerTicked {
            remaining_secs: self.countdown.remaining_secs(),
            display: self.countdown.display(),
            at: Utc::now(),
        })
    }

    /// Mark `token` as in motion. Rejected (no marking, no event) when the
    /// session has ended; a token naming no item is a loud error.
    pub fn drag_start(&mut self, token: &str) -> Result<Option<Event>, GestureError> {
        if self.board.item(token).is_none() {
            return Err(GestureError::UnknownItem(token.to_string()));
        }
        if !self.is_active() {
            return Ok(None);
        }
        self.drag.begin(token.to_string());
        Ok(Some(Event::DragStarted {
            token: token.to_string(),
            at: Utc::now(),
        }))
    }

    /// Clear the in-motion marker unconditionally, even if the session
    /// ended mid-gesture, so a stale marker never leaks into the next
    /// gesture.
    pub fn drag_end(&mut self) -> Option<Event> {
        self.drag.end().map(|token| Event::DragEnded {
            token,
            at: Utc::now(),
        })
    }

    /// Drop the in-motion item onto slot `index`. Ignored when the session
    /// has ended or nothing is in motion; completing the drop consumes the
    /// drag. A prior occupant is evicted to the pool, never lost.
    pub fn drop_on_slot(&mut self, index: usize) -> Result<Option<Event>, GestureError> {
        let len = self.board.slots().len();
        if index >= len {
            return Err(GestureError::SlotOutOfBounds { index, len });
        }
        if !self.is_active() {
            return Ok(None);
        }
        let Some(token) = self.drag.end() else {
            return Ok(None);
        };
        let displaced = self.board.place(&token, index);
        Ok(Some(Event::ItemPlaced {
            token,
            slot: index,
            displaced,
            at: Utc::now(),
        }))
    }

    /// Drop the in-motion item back into the unplaced pool. Ignored when
    /// the session has ended or nothing is in motion.
    pub fn drop_on_pool(&mut self) -> Option<Event> {
        if !self.is_active() || self.drag.is_idle() {
            return None;
        }
        let token = self.drag.end()?;
        self.board.return_to_pool(&token);
        Some(Event::ItemReturned {
            token,
            at: Utc::now(),
        })
    }

    /// Grade the arrangement. Ignored when the session has ended. An
    /// incomplete board is rejected with a prompt and the session stays
    /// active; a complete board ends the session either way.
    pub fn submit(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        match grade(&self.board) {
            Verdict::Incomplete { filled } => Some(Event::SubmissionRejected {
                filled,
                prompt: PROMPT_FILL_ALL.to_string(),
                at: Utc::now(),
            }),
            Verdict::Correct => Some(self.end(true, MSG_WIN)),
            Verdict::Incorrect { .. } => Some(self.end(false, MSG_INCORRECT)),
        }
    }

    /// Discard all session state and rebuild from the configuration:
    /// full duration restored, every slot emptied back into the initial
    /// pool, outcome cleared, countdown re-armed.
    pub fn restart(&mut self) -> Event {
        self.countdown = Countdown::new(self.config.duration_secs);
        self.board = Board::from_config(&self.config);
        self.drag = DragState::Idle;
        self.outcome = None;
        self.countdown.start();
        Event::SessionReset { at: Utc::now() }
    }

    /// The single terminal transition. Guarded: the first outcome wins,
    /// so a tick and a submission in the same second cannot double-report.
    fn end(&mut self, won: bool, message: &str) -> Event {
        debug_assert!(self.outcome.is_none());
        self.countdown.stop();
        let outcome = Outcome::new(won, message);
        self.outcome = Some(outcome.clone());
        Event::SessionEnded {
            outcome,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let mut s = GameSession::new(QuizConfig::default()).unwrap();
        s.start();
        s
    }

    /// drag_start + drop_on_slot, the way a frontend forwards a completed
    /// gesture.
    fn place(s: &mut GameSession, token: &str, slot: usize) {
        s.drag_start(token).unwrap();
        s.drop_on_slot(slot).unwrap();
    }

    fn fill_correct(s: &mut GameSession) {
        for (i, token) in ["1", "2-alt", "3", "4", "5"].iter().enumerate() {
            place(s, token, i);
        }
    }

    #[test]
    fn correct_arrangement_wins() {
        let mut s = session();
        fill_correct(&mut s);
        match s.submit() {
            Some(Event::SessionEnded { outcome, .. }) => {
                assert!(outcome.won);
                assert_eq!(outcome.title, TITLE_WIN);
            }
            other => panic!("expected SessionEnded, got {other:?}"),
        }
        assert!(!s.is_active());
    }

    #[test]
    fn wrong_arrangement_loses_with_generic_message() {
        let mut s = session();
        for (i, token) in ["1", "2", "4", "3", "5"].iter().enumerate() {
            place(&mut s, token, i);
        }
        match s.submit() {
            Some(Event::SessionEnded { outcome, .. }) => {
                assert!(!outcome.won);
                assert_eq!(outcome.message, MSG_INCORRECT);
            }
            other => panic!("expected SessionEnded, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_submission_keeps_session_active() {
        let mut s = session();
        for (i, token) in ["1", "2", "3", "4"].iter().enumerate() {
            place(&mut s, token, i);
        }
        match s.submit() {
            Some(Event::SubmissionRejected { filled, .. }) => assert_eq!(filled, 4),
            other => panic!("expected SubmissionRejected, got {other:?}"),
        }
        assert!(s.is_active());
    }

    #[test]
    fn expiry_ends_session_regardless_of_fill() {
        let mut cfg = QuizConfig::default();
        cfg.duration_secs = 2;
        let mut s = GameSession::new(cfg).unwrap();
        s.start();
        for (i, token) in ["1", "2", "3"].iter().enumerate() {
            place(&mut s, token, i);
        }
        assert!(matches!(s.tick(), Some(Event::TimerTicked { .. })));
        match s.tick() {
            Some(Event::SessionEnded { outcome, .. }) => {
                assert!(!outcome.won);
                assert_eq!(outcome.message, MSG_TIME_EXPIRED);
            }
            other => panic!("expected SessionEnded, got {other:?}"),
        }
        // Frozen: further ticks decrement nothing and emit nothing.
        assert!(s.tick().is_none());
        assert_eq!(s.countdown().remaining_secs(), 0);
    }

    #[test]
    fn ended_session_ignores_gestures_and_submit() {
        let mut s = session();
        fill_correct(&mut s);
        s.submit();
        assert!(!s.is_active());

        assert!(s.drag_start("6").unwrap().is_none());
        assert!(s.dragging().is_none());
        assert!(s.drop_on_pool().is_none());
        assert!(s.drop_on_slot(0).unwrap().is_none());
        assert!(s.submit().is_none());
        // Board untouched.
        assert_eq!(s.board().filled_count(), 5);
    }

    #[test]
    fn drag_end_clears_even_after_session_ends() {
        let mut cfg = QuizConfig::default();
        cfg.duration_secs = 1;
        let mut s = GameSession::new(cfg).unwrap();
        s.start();
        s.drag_start("1").unwrap();
        s.tick(); // Session ends mid-gesture.
        assert!(!s.is_active());
        assert!(matches!(s.drag_end(), Some(Event::DragEnded { .. })));
        assert!(s.dragging().is_none());
    }

    #[test]
    fn drop_without_drag_is_ignored() {
        let mut s = session();
        assert!(s.drop_on_slot(0).unwrap().is_none());
        assert!(s.drop_on_pool().is_none());
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn unknown_token_and_bad_slot_fail_loudly() {
        let mut s = session();
        assert!(matches!(
            s.drag_start("nope"),
            Err(GestureError::UnknownItem(_))
        ));
        s.drag_start("1").unwrap();
        assert!(matches!(
            s.drop_on_slot(9),
            Err(GestureError::SlotOutOfBounds { index: 9, len: 5 })
        ));
    }

    #[test]
    fn displacement_returns_occupant_to_pool() {
        let mut s = session();
        place(&mut s, "1", 0);
        s.drag_start("1-alt").unwrap();
        match s.drop_on_slot(0).unwrap() {
            Some(Event::ItemPlaced { displaced, .. }) => {
                assert_eq!(displaced.as_deref(), Some("1"));
            }
            other => panic!("expected ItemPlaced, got {other:?}"),
        }
        assert!(s.board().pool().contains(&"1".to_string()));
    }

    #[test]
    fn restart_rebuilds_initial_state() {
        let mut s = session();
        fill_correct(&mut s);
        s.tick();
        s.submit();
        assert!(!s.is_active());

        s.restart();
        assert!(s.is_active());
        assert!(s.outcome().is_none());
        assert_eq!(s.countdown().remaining_secs(), 300);
        assert!(s.countdown().is_armed());
        assert_eq!(s.board().filled_count(), 0);
        assert_eq!(s.board().pool().len(), s.board().items().len());
    }

    #[test]
    fn malformed_config_is_rejected_at_construction() {
        let mut cfg = QuizConfig::default();
        cfg.slots[0].step = 2;
        assert!(GameSession::new(cfg).is_err());
    }
}
