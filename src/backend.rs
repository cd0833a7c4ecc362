//! Front-end contract between the engine and its rendering backends.
//!
//! A backend draws read-only snapshots and produces input symbols; it never
//! mutates game state. The frame loop in [`crate::session`] owns the state
//! and drives any [`Backend`] implementation through this trait, so the
//! engine stays agnostic of terminals, browsers, or test harnesses.

mod queue;
mod terminal;

pub use queue::{FrameData, QueuedBackend};
pub use terminal::TerminalBackend;

use std::fmt;

use crate::engine::{Direction, GameState, Grid, Status};

/// One symbol of user input, already decoded by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSymbol {
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Start a fresh game.
    Restart,
    /// End the session.
    Quit,
    /// Nothing meaningful was read; the turn is a no-op.
    None,
}

impl InputSymbol {
    /// The direction this symbol encodes, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            InputSymbol::Up => Some(Direction::Up),
            InputSymbol::Down => Some(Direction::Down),
            InputSymbol::Left => Some(Direction::Left),
            InputSymbol::Right => Some(Direction::Right),
            InputSymbol::Restart | InputSymbol::Quit | InputSymbol::None => None,
        }
    }
}

/// Read-only view of the game state handed to backends for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// The board.
    pub grid: &'a Grid,
    /// Current score.
    pub score: u32,
    /// Session high score.
    pub high_score: u32,
    /// Lifecycle status.
    pub status: Status,
}

impl<'a> Snapshot<'a> {
    /// Capture a snapshot of a game state.
    #[must_use]
    pub fn of(state: &'a GameState) -> Self {
        Self {
            grid: state.grid(),
            score: state.score(),
            high_score: state.high_score(),
            status: state.status(),
        }
    }
}

/// Backend I/O error.
///
/// Render and input failures stay on the backend side of the contract;
/// they never enter the engine's error taxonomy.
#[derive(Debug)]
pub struct BackendError {
    message: String,
}

impl BackendError {
    /// Create a new backend error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// A rendering/input front end driven by the frame loop.
///
/// `init` and `teardown` bracket the session; the frame loop guarantees
/// `teardown` runs on every exit path, including errors. `read_input` may
/// block (terminal) or drain a host-fed queue (embedded hosts); `draw`
/// must not block the engine.
pub trait Backend {
    /// Acquire backend resources (terminal modes, host contexts).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be brought up.
    fn init(&mut self) -> Result<(), BackendError>;

    /// Render a snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> Result<(), BackendError>;

    /// Read one input symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn read_input(&mut self) -> Result<InputSymbol, BackendError>;

    /// Release backend resources.
    ///
    /// # Errors
    ///
    /// Returns an error if cleanup fails; callers still treat the session
    /// as finished.
    fn teardown(&mut self) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameConfig;

    #[test]
    fn test_input_symbol_directions() {
        assert_eq!(InputSymbol::Up.direction(), Some(Direction::Up));
        assert_eq!(InputSymbol::Left.direction(), Some(Direction::Left));
        assert_eq!(InputSymbol::Quit.direction(), None);
        assert_eq!(InputSymbol::None.direction(), None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = GameState::new(GameConfig::default(), 42, 123).unwrap();
        let snapshot = Snapshot::of(&state);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.high_score, 123);
        assert_eq!(snapshot.status, Status::Playing);
        assert_eq!(snapshot.grid.size(), 4);
    }
}
