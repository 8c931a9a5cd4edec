//! Grading of a submitted arrangement.
//!
//! The matching rule is a string-prefix check: a slot expecting step 2
//! accepts any occupant whose token starts with `"2"`, which is what lets
//! `"2-alt"` count as correct. The looseness cuts both ways -- a token
//! `"20"` would also match step 2. That is the intended rule, not an
//! equality check.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Result of grading a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    /// Not every slot is filled; the submission is rejected and the
    /// session stays live.
    Incomplete { filled: usize },
    /// Every slot filled and every occupant matches its slot's step.
    Correct,
    /// Every slot filled but at least one occupant is wrong. No partial
    /// credit; the count is informational only.
    Incorrect { correct: usize },
}

/// Does `token` belong in a slot expecting `step`?
pub fn step_matches(token: &str, step: u8) -> bool {
    token.starts_with(&step.to_string())
}

/// Grade the current arrangement. Empty slots are skipped, not counted
/// as filled.
pub fn grade(board: &Board) -> Verdict {
    let mut filled = 0;
    let mut correct = 0;

    for slot in board.slots() {
        let Some(token) = slot.occupant.as_deref() else {
            continue;
        };
        filled += 1;
        if step_matches(token, slot.step) {
            correct += 1;
        }
    }

    if filled < board.slots().len() {
        Verdict::Incomplete { filled }
    } else if correct == filled {
        Verdict::Correct
    } else {
        Verdict::Incorrect { correct }
    }
}
