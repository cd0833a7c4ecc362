//! Game engine core.
//!
//! Implements the rules of the sliding-tile game:
//! - Board with logical `(row, col)` tile accessors
//! - Move resolution (compact, merge once per tile, pad)
//! - Weighted random spawns from a seeded PRNG
//! - Turn sequencing with win/loss detection and score tracking
//! - Invariant checks that flag engine bugs

mod grid;
mod invariants;
mod moves;
mod rng;
mod spawn;
mod state;

pub use grid::{is_valid_tile, Grid};
pub use invariants::{
    check_invariants, InvariantViolation, SANITY_MAX_SCORE, SANITY_MAX_TILE,
};
pub use moves::{apply_move, has_any_move, Direction, MoveResult};
pub use rng::Rng;
pub use spawn::spawn;
pub use state::{GameConfig, GameState, Status, TurnOutcome};
