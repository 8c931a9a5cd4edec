//! # Stepquiz Core Library
//!
//! Core logic for Stepquiz, a drag-and-drop quiz where the player arranges
//! the steps of a sales process into ordered slots against a countdown.
//! It implements a CLI-first philosophy: all gameplay is available through
//! the core session API, with any frontend being a thin layer that forwards
//! gestures and polls snapshots.
//!
//! ## Architecture
//!
//! - **Countdown**: a tick-driven timer that requires the caller to invoke
//!   `tick()` once per second -- no internal threads
//! - **Board**: the placement surface (unplaced pool + ordered slots) with
//!   an explicit drag state machine
//! - **Validator**: prefix-based grading of slot occupants
//! - **Session**: the controller owning all mutable state, reachable only
//!   through gesture/submit/tick handlers
//!
//! ## Key Components
//!
//! - [`GameSession`]: the per-play-through state machine
//! - [`Board`]: slot/pool assignments with a single-owner invariant
//! - [`QuizConfig`]: TOML-backed static configuration (items, slots, duration)

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod timer;
pub mod validate;

pub use board::{Board, DragState, Item, Location, Slot};
pub use config::{ItemSpec, QuizConfig, SlotSpec};
pub use error::{ConfigError, CoreError, GestureError};
pub use events::Event;
pub use session::{GameSession, Outcome};
pub use timer::Countdown;
pub use validate::{grade, Verdict};
