//! Random tile spawning after a changed move.

use crate::engine::grid::Grid;
use crate::engine::rng::Rng;
use crate::error::{GameError, GameResult};

/// Insert one new tile into a uniformly random empty cell.
///
/// The tile is a 4 with `four_tile_percent` probability (10 in the standard
/// ruleset), otherwise a 2. Returns the coordinate that was filled.
///
/// # Errors
///
/// Returns `NoEmptyCell` if the board is full. The state machine only ever
/// spawns after a changed move on a non-full board, so hitting this is an
/// internal invariant failure, not a normal game-over path.
pub fn spawn(grid: &mut Grid, rng: &mut Rng, four_tile_percent: u8) -> GameResult<(usize, usize)> {
    let empties: Vec<(usize, usize)> = grid.empty_cells().collect();
    if empties.is_empty() {
        return Err(GameError::NoEmptyCell);
    }

    #[allow(clippy::cast_possible_truncation)]
    let pick = rng.next_u32(empties.len() as u32) as usize;
    let (row, col) = empties[pick];

    let value = if rng.percent_roll(four_tile_percent) { 4 } else { 2 };
    grid.set(row, col, value)?;

    Ok((row, col))
}
