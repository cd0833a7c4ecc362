//! The board and its tile accessors.

use crate::error::{GameError, GameResult};

/// Check whether a value is legal for a cell: empty, or a power of two ≥ 2.
#[must_use]
pub const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// An N×N board of tiles.
///
/// A cell holds 0 (empty) or a power of two ≥ 2. Cells are addressed by
/// logical `(row, col)` coordinates; the linear storage order is an internal
/// detail that callers must never rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Side length of the board.
    size: usize,
    /// Cells in row-major order.
    cells: Vec<u32>,
}

impl Grid {
    /// Create an empty board with the given side length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `size` is zero.
    pub fn new(size: usize) -> GameResult<Self> {
        if size == 0 {
            return Err(GameError::InvalidConfiguration(
                "grid size must be non-zero",
            ));
        }

        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Get the side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Check if a coordinate is within the board.
    #[must_use]
    pub const fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Convert a logical coordinate to an index into the cell storage.
    const fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if self.in_bounds(row, col) {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    /// Get the value at a cell.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the board.
    pub fn get(&self, row: usize, col: usize) -> GameResult<u32> {
        self.index_of(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(GameError::OutOfBounds { row, col })
    }

    /// Set the value at a cell.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the board, or
    /// `InvalidTileValue` if the value is neither 0 nor a power of two ≥ 2.
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> GameResult<()> {
        if !is_valid_tile(value) {
            return Err(GameError::InvalidTileValue(value));
        }

        let idx = self
            .index_of(row, col)
            .ok_or(GameError::OutOfBounds { row, col })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Iterate over all cells with their logical coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &value)| {
            let row = idx / self.size;
            let col = idx % self.size;
            (row, col, value)
        })
    }

    /// Iterate over the coordinates of all empty cells, row-major.
    ///
    /// The sequence is recomputed from the current board state on every
    /// call; there is no stale-iterator behavior across mutations.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|&(_, _, value)| value == 0)
            .map(|(row, col, _)| (row, col))
    }

    /// Count the empty cells on the board.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Get the largest tile on the board (0 for an empty board).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}
