//! The synchronous frame loop.
//!
//! One iteration draws the current state, blocks on the backend for one
//! input symbol, and applies one complete turn. Nothing else touches the
//! game state while a session runs; backends only ever see read-only
//! snapshots.

use std::fmt;

use log::warn;

use crate::backend::{Backend, BackendError, InputSymbol, Snapshot};
use crate::engine::{GameState, Status};
use crate::error::GameError;
use crate::score::HighScoreStore;

/// Session failure: a backend I/O fault or an internal engine fault.
#[derive(Debug)]
pub struct SessionError {
    message: String,
}

impl SessionError {
    /// Create a new session error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SessionError {}

impl From<BackendError> for SessionError {
    fn from(e: BackendError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

/// What a finished session looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Final score of the last game played.
    pub score: u32,
    /// Session high score.
    pub high_score: u32,
    /// Status at quit time.
    pub status: Status,
    /// Number of board-changing turns across the session.
    pub turns: u64,
}

/// Drive a game to completion through a backend.
///
/// Blocks until the backend yields `Quit`. The backend is initialized
/// before the first frame; once `init` succeeds, `teardown` runs on every
/// exit path, including errors. New high scores are persisted as they
/// happen; a failing store is logged and otherwise ignored.
///
/// # Errors
///
/// Returns an error if the backend fails or the engine reports an internal
/// fault. Configuration errors cannot occur here; the state was already
/// constructed.
pub fn run(
    state: &mut GameState,
    backend: &mut impl Backend,
    store: &mut dyn HighScoreStore,
) -> Result<SessionSummary, SessionError> {
    backend.init()?;

    let result = frame_loop(state, backend, store);

    // Teardown must run even when the loop failed; a loop error wins over
    // a teardown error.
    let teardown = backend.teardown();
    let summary = result?;
    teardown?;

    Ok(summary)
}

fn frame_loop(
    state: &mut GameState,
    backend: &mut impl Backend,
    store: &mut dyn HighScoreStore,
) -> Result<SessionSummary, SessionError> {
    let mut turns = 0u64;
    let mut best_saved = state.high_score();

    loop {
        backend.draw(&Snapshot::of(state))?;

        match backend.read_input()? {
            InputSymbol::Quit => break,
            InputSymbol::Restart => state.restart()?,
            InputSymbol::None => {}
            symbol => {
                if let Some(direction) = symbol.direction() {
                    let outcome = state.step(direction)?;
                    if outcome.moved {
                        turns += 1;
                    }
                    if state.high_score() > best_saved {
                        best_saved = state.high_score();
                        if let Err(e) = store.save(best_saved) {
                            warn!("failed to persist high score: {e}");
                        }
                    }
                }
            }
        }
    }

    Ok(SessionSummary {
        score: state.score(),
        high_score: state.high_score(),
        status: state.status(),
        turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::QueuedBackend;
    use crate::engine::GameConfig;
    use crate::score::MemoryStore;

    fn new_state(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), seed, 0).unwrap()
    }

    #[test]
    fn test_quit_immediately() {
        let mut state = new_state(1);
        let mut backend = QueuedBackend::scripted(&[InputSymbol::Quit]);
        let mut store = MemoryStore::new();

        let summary = run(&mut state, &mut backend, &mut store).unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.status, Status::Playing);
        // The opening frame was drawn before the quit was read
        assert!(backend.last_frame().is_some());
    }

    #[test]
    fn test_moves_accumulate_turns() {
        let mut state = new_state(42);
        let mut backend = QueuedBackend::scripted(&[
            InputSymbol::Left,
            InputSymbol::Up,
            InputSymbol::Right,
            InputSymbol::Quit,
        ]);
        let mut store = MemoryStore::new();

        let summary = run(&mut state, &mut backend, &mut store).unwrap();
        assert!(summary.turns <= 3);
        assert_eq!(summary.score, state.score());
    }

    #[test]
    fn test_restart_resets_score() {
        let mut state = new_state(42);
        // Grind a few moves, then restart, then quit
        let mut backend = QueuedBackend::scripted(&[
            InputSymbol::Left,
            InputSymbol::Up,
            InputSymbol::Left,
            InputSymbol::Up,
            InputSymbol::Restart,
            InputSymbol::Quit,
        ]);
        let mut store = MemoryStore::new();

        let summary = run(&mut state, &mut backend, &mut store).unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.status, Status::Playing);
    }

    #[test]
    fn test_high_score_saved_to_store() {
        let mut state = new_state(42);
        let mut backend = QueuedBackend::scripted(&[
            InputSymbol::Left,
            InputSymbol::Up,
            InputSymbol::Left,
            InputSymbol::Down,
            InputSymbol::Right,
            InputSymbol::Quit,
        ]);
        let mut store = MemoryStore::new();

        let summary = run(&mut state, &mut backend, &mut store).unwrap();
        assert_eq!(store.load(), summary.high_score);
    }

    #[test]
    fn test_none_input_is_noop() {
        let mut state = new_state(7);
        let before = state.grid().clone();
        let mut backend =
            QueuedBackend::scripted(&[InputSymbol::None, InputSymbol::Quit]);
        let mut store = MemoryStore::new();

        let summary = run(&mut state, &mut backend, &mut store).unwrap();
        assert_eq!(summary.turns, 0);
        assert_eq!(state.grid(), &before);
    }
}
