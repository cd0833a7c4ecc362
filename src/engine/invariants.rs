//! Engine invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented engine. If they
//! do, it indicates a bug in the move, spawn, or scoring logic, not a
//! gameplay condition.

use crate::engine::grid::is_valid_tile;
use crate::engine::moves::has_any_move;
use crate::engine::state::{GameState, Status};

/// Sanity bound: no tile should ever exceed this.
/// A 4×4 board tops out at 2^17 = 131072; 2^20 leaves headroom for large
/// configured boards.
pub const SANITY_MAX_TILE: u32 = 1 << 20;

/// Sanity bound: the score should never exceed this.
/// Reaching it would take on the order of a hundred thousand merges of the
/// largest representable tiles.
pub const SANITY_MAX_SCORE: u32 = 100_000_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all engine invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (row, col, value) in state.grid().iter() {
        if !is_valid_tile(value) {
            violations.push(InvariantViolation {
                message: format!("cell ({row}, {col}) holds {value}, not a power of two"),
            });
        }

        if value > SANITY_MAX_TILE {
            violations.push(InvariantViolation {
                message: format!(
                    "cell ({row}, {col}) holds {value} > sanity max {SANITY_MAX_TILE}"
                ),
            });
        }
    }

    if state.score() > SANITY_MAX_SCORE {
        violations.push(InvariantViolation {
            message: format!(
                "score {} exceeds sanity max {SANITY_MAX_SCORE}",
                state.score()
            ),
        });
    }

    if state.high_score() < state.score() {
        violations.push(InvariantViolation {
            message: format!(
                "high score {} fell below current score {}",
                state.high_score(),
                state.score()
            ),
        });
    }

    match state.status() {
        Status::Lost => {
            if has_any_move(state.grid()) {
                violations.push(InvariantViolation {
                    message: "status is Lost but a legal move remains".to_string(),
                });
            }
        }
        Status::Playing => {
            if !has_any_move(state.grid()) {
                violations.push(InvariantViolation {
                    message: "status is Playing but no legal move remains".to_string(),
                });
            }
        }
        Status::Won => {}
    }

    violations
}
