//! Drag gesture state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging(token) -> Idle
//! ```
//!
//! A drop with no item in motion is unrepresentable: completing a drop
//! consumes the `Dragging` state, and every other path back to `Idle`
//! goes through `end()`.

use serde::{Deserialize, Serialize};

/// Which item, if any, is currently in motion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging { token: String },
}

impl DragState {
    /// Mark `token` as in motion. Starting a new drag while another item
    /// is in motion replaces it.
    pub fn begin(&mut self, token: String) {
        *self = DragState::Dragging { token };
    }

    /// Clear the in-motion marker unconditionally. Returns the token that
    /// was in motion, if any.
    pub fn end(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging { token } => Some(token),
        }
    }

    pub fn dragging(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { token } => Some(token),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}
