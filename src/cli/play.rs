//! Play command implementation - interactive terminal game.

// Seed derivation intentionally truncates the nanosecond clock
#![allow(clippy::cast_possible_truncation)]

use super::CliError;
use slide48::backend::TerminalBackend;
use slide48::score::{HighScoreStore, JsonFileStore, MemoryStore};
use slide48::session;
use slide48::{GameConfig, GameState, Status};
use std::path::PathBuf;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error for an invalid configuration or a terminal failure.
pub(crate) fn execute(
    size: usize,
    win: u32,
    four_percent: u8,
    seed: Option<u64>,
    score_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = GameConfig {
        size,
        win_threshold: win,
        four_tile_percent: four_percent,
    };
    // Reject bad configuration before the terminal is touched
    config.validate()?;

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let mut store: Box<dyn HighScoreStore> =
        match score_file.or_else(JsonFileStore::default_path) {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };

    let high_score = store.load();
    let mut state = GameState::new(config, seed, high_score)?;
    let mut backend = TerminalBackend::new();

    let summary = session::run(&mut state, &mut backend, store.as_mut())?;

    let verdict = match summary.status {
        Status::Won => "You won!",
        Status::Lost => "Game over.",
        Status::Playing => "Until next time.",
    };
    println!("{verdict}");
    println!(
        "Final score: {} | Best: {} | Moves: {}",
        summary.score, summary.high_score, summary.turns
    );

    Ok(())
}
