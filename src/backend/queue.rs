//! Queue-fed backend for embedding hosts and scripted tests.
//!
//! Event-driven hosts (a browser page, a test harness) cannot block the
//! frame loop on a key read. Instead they push decoded [`InputSymbol`]s
//! into a bounded queue, and the frame loop drains it synchronously: an
//! empty queue reads as [`InputSymbol::None`], a no-op turn. The latest
//! drawn frame is kept as owned data for the host to poll.

use std::collections::VecDeque;

use crate::backend::{Backend, BackendError, InputSymbol, Snapshot};
use crate::engine::Status;

/// Owned copy of the most recently drawn snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameData {
    /// Board cells in row-major rows.
    pub cells: Vec<Vec<u32>>,
    /// Score at draw time.
    pub score: u32,
    /// High score at draw time.
    pub high_score: u32,
    /// Status at draw time.
    pub status: Status,
}

/// Backend fed by a bounded input queue.
#[derive(Debug, Clone)]
pub struct QueuedBackend {
    capacity: usize,
    inputs: VecDeque<InputSymbol>,
    last_frame: Option<FrameData>,
}

impl QueuedBackend {
    /// Create a backend with the given queue capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inputs: VecDeque::new(),
            last_frame: None,
        }
    }

    /// Create a backend preloaded with a script of inputs.
    ///
    /// The capacity grows to hold the whole script.
    #[must_use]
    pub fn scripted(inputs: &[InputSymbol]) -> Self {
        let mut backend = Self::new(inputs.len().max(1));
        backend.inputs.extend(inputs.iter().copied());
        backend
    }

    /// Enqueue one input symbol from the host.
    ///
    /// Returns `false` (dropping the symbol) when the queue is full.
    pub fn push_input(&mut self, symbol: InputSymbol) -> bool {
        if self.inputs.len() >= self.capacity {
            return false;
        }
        self.inputs.push_back(symbol);
        true
    }

    /// Number of queued, not yet consumed inputs.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inputs.len()
    }

    /// The most recently drawn frame, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameData> {
        self.last_frame.as_ref()
    }
}

impl Backend for QueuedBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> Result<(), BackendError> {
        let size = snapshot.grid.size();
        let mut cells = vec![vec![0u32; size]; size];
        for (row, col, value) in snapshot.grid.iter() {
            cells[row][col] = value;
        }

        self.last_frame = Some(FrameData {
            cells,
            score: snapshot.score,
            high_score: snapshot.high_score,
            status: snapshot.status,
        });
        Ok(())
    }

    fn read_input(&mut self) -> Result<InputSymbol, BackendError> {
        Ok(self.inputs.pop_front().unwrap_or(InputSymbol::None))
    }

    fn teardown(&mut self) -> Result<(), BackendError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameConfig, GameState};

    #[test]
    fn test_queue_drains_in_order() {
        let mut backend = QueuedBackend::new(4);
        assert!(backend.push_input(InputSymbol::Left));
        assert!(backend.push_input(InputSymbol::Up));

        assert_eq!(backend.read_input().unwrap(), InputSymbol::Left);
        assert_eq!(backend.read_input().unwrap(), InputSymbol::Up);
        assert_eq!(backend.read_input().unwrap(), InputSymbol::None);
    }

    #[test]
    fn test_queue_bounded() {
        let mut backend = QueuedBackend::new(2);
        assert!(backend.push_input(InputSymbol::Left));
        assert!(backend.push_input(InputSymbol::Right));
        // Full: the third symbol is dropped, not queued
        assert!(!backend.push_input(InputSymbol::Up));
        assert_eq!(backend.pending(), 2);
    }

    #[test]
    fn test_draw_keeps_latest_frame() {
        let state = GameState::new(GameConfig::default(), 42, 7).unwrap();
        let mut backend = QueuedBackend::new(1);

        assert!(backend.last_frame().is_none());
        backend.draw(&Snapshot::of(&state)).unwrap();

        let frame = backend.last_frame().unwrap();
        assert_eq!(frame.high_score, 7);
        assert_eq!(frame.cells.len(), 4);
        let tiles: usize = frame
            .cells
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(tiles, 2);
    }

    #[test]
    fn test_scripted_backend() {
        let mut backend =
            QueuedBackend::scripted(&[InputSymbol::Left, InputSymbol::Quit]);
        assert_eq!(backend.pending(), 2);
        assert_eq!(backend.read_input().unwrap(), InputSymbol::Left);
        assert_eq!(backend.read_input().unwrap(), InputSymbol::Quit);
    }
}
