//! Core error types for stepquiz-core.
//!
//! Gameplay outcomes (incomplete submission, wrong arrangement, timer
//! expiry) are events, not errors. Errors here cover malformed quiz
//! configuration and malformed gesture input, both of which must fail
//! loudly instead of silently misvalidating.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stepquiz-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed gesture input
    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Countdown duration must be at least one second
    #[error("Countdown duration must be at least one second")]
    ZeroDuration,

    /// No slots configured
    #[error("Quiz has no slots")]
    NoSlots,

    /// No items configured
    #[error("Quiz has no items")]
    NoItems,

    /// Slot expected-step out of range
    #[error("Slot {index} expects step {step}, outside 1..={max}")]
    SlotStepOutOfRange { index: usize, step: u8, max: u8 },

    /// Two slots expect the same step
    #[error("More than one slot expects step {step}")]
    DuplicateSlotStep { step: u8 },

    /// Item with an empty identity token
    #[error("Item {index} has an empty identity token")]
    EmptyItemToken { index: usize },

    /// Item with an empty display label
    #[error("Item '{token}' has an empty label")]
    EmptyItemLabel { token: String },

    /// Two items share an identity token
    #[error("Duplicate item token '{token}'")]
    DuplicateItemToken { token: String },
}

/// Errors for gestures that name entities the board does not have.
///
/// Inactive-session gestures are ignored, not errors; only input that
/// could never be valid is rejected loudly.
#[derive(Error, Debug)]
pub enum GestureError {
    /// The dragged token does not name any item in this session
    #[error("Unknown item token '{0}'")]
    UnknownItem(String),

    /// The drop target index is not a slot on this board
    #[error("Slot index {index} out of bounds (board has {len} slots)")]
    SlotOutOfBounds { index: usize, len: usize },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
