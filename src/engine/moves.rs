//! Sliding and merging of tiles along a direction.

// Line coordinates are generated in bounds and merged values stay powers of
// two, so the expects below are unreachable
#![allow(clippy::missing_panics_doc)]

use crate::engine::grid::Grid;

/// A direction a move can slide tiles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Slide tiles toward the top edge.
    Up,
    /// Slide tiles toward the bottom edge.
    Down,
    /// Slide tiles toward the left edge.
    Left,
    /// Slide tiles toward the right edge.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Outcome of applying one move to a board.
///
/// Transient: produced by [`apply_move`], folded into the game state by the
/// caller, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after the move.
    pub grid: Grid,
    /// Sum of the tile values created by merges during this move.
    pub score_delta: u32,
    /// Whether any cell changed relative to the input board.
    pub moved: bool,
}

/// Coordinates of one line, ordered from the edge tiles slide toward.
///
/// Index 0 of the returned sequence is the near edge of travel, so the
/// collapse step can treat every direction identically.
fn line_coords(size: usize, direction: Direction, lane: usize) -> Vec<(usize, usize)> {
    match direction {
        Direction::Left => (0..size).map(|col| (lane, col)).collect(),
        Direction::Right => (0..size).rev().map(|col| (lane, col)).collect(),
        Direction::Up => (0..size).map(|row| (row, lane)).collect(),
        Direction::Down => (0..size).rev().map(|row| (row, lane)).collect(),
    }
}

/// Compact and merge one line already ordered toward the travel edge.
///
/// Zeros are removed, then equal adjacent pairs merge once per tile,
/// nearest to the edge first; the result is padded back to length with
/// zeros at the far end. Returns the new line and the score gained.
fn collapse_line(line: &[u32]) -> (Vec<u32>, u32) {
    let compacted: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut result = Vec::with_capacity(line.len());
    let mut delta = 0u32;
    let mut i = 0;
    while i < compacted.len() {
        if i + 1 < compacted.len() && compacted[i] == compacted[i + 1] {
            // A merged tile may not merge again this move
            let merged = compacted[i] * 2;
            result.push(merged);
            delta += merged;
            i += 2;
        } else {
            result.push(compacted[i]);
            i += 1;
        }
    }
    result.resize(line.len(), 0);

    (result, delta)
}

/// Apply one move to a board snapshot.
///
/// The input board is never mutated; the result carries the new board, the
/// score gained from merges, and whether anything changed. A move that
/// changes nothing must not be followed by a spawn.
#[must_use]
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveResult {
    let size = grid.size();
    let mut next = grid.clone();
    let mut score_delta = 0u32;
    let mut moved = false;

    for lane in 0..size {
        let coords = line_coords(size, direction, lane);
        let line: Vec<u32> = coords
            .iter()
            .map(|&(row, col)| {
                grid.get(row, col)
                    .expect("line coordinates are in bounds")
            })
            .collect();

        let (collapsed, delta) = collapse_line(&line);
        score_delta += delta;

        if collapsed != line {
            moved = true;
            for (&(row, col), &value) in coords.iter().zip(collapsed.iter()) {
                next.set(row, col, value)
                    .expect("collapsed lines contain only legal tiles");
            }
        }
    }

    MoveResult {
        grid: next,
        score_delta,
        moved,
    }
}

/// Check whether any of the four directions would change the board.
#[must_use]
pub fn has_any_move(grid: &Grid) -> bool {
    Direction::ALL
        .iter()
        .any(|&direction| apply_move(grid, direction).moved)
}
