//! Selfplay command implementation - mass random-policy games.

// Seed derivation intentionally truncates the nanosecond clock
#![allow(clippy::cast_possible_truncation)]

use super::output::{
    format_selfplay_csv, format_selfplay_text, JsonSelfplayResult, SelfplayStats,
};
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use slide48::engine::{check_invariants, Direction, GameConfig, GameState, Rng, Status};
use std::time::Instant;

/// Outcome of one headless game.
pub(crate) struct GameRecord {
    /// Final score.
    pub(crate) score: u32,
    /// Largest tile reached.
    pub(crate) max_tile: u32,
    /// Board-changing turns played.
    pub(crate) turns: u64,
    /// Status when the game ended (or the cap was hit).
    pub(crate) status: Status,
}

/// Play one game to completion with a uniformly random move policy.
fn play_one(seed: u64, config: GameConfig, max_turns: u64) -> Result<GameRecord, CliError> {
    let mut state = GameState::new(config, seed, 0)?;
    // Decorrelate the move policy from the spawn stream
    let mut policy = Rng::new(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut turns = 0u64;

    for _ in 0..max_turns {
        if state.status().is_terminal() {
            break;
        }
        let direction = Direction::ALL[policy.next_u32(4) as usize];
        let outcome = state.step(direction)?;
        if outcome.moved {
            turns += 1;
        }
    }

    // A violation here is an engine bug; surface it instead of folding the
    // game into the statistics.
    if let Some(violation) = check_invariants(&state).first() {
        return Err(CliError::new(violation.to_string()));
    }

    Ok(GameRecord {
        score: state.score(),
        max_tile: state.grid().max_tile(),
        turns,
        status: state.status(),
    })
}

/// Execute the selfplay command.
///
/// # Errors
///
/// Returns an error for an invalid configuration or an engine fault.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    size: usize,
    win: u32,
    four_percent: u8,
    max_turns: u64,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = GameConfig {
        size,
        win_threshold: win,
        four_tile_percent: four_percent,
    };
    config.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run games in parallel using lock-free fold/reduce pattern
    // Each thread accumulates into its own SelfplayStats, then we merge at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SelfplayStats::new, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);

            if let Ok(record) = play_one(game_seed, config, max_turns) {
                local_stats.add_record(&record);
            }

            local_stats
        })
        .reduce(SelfplayStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.games_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    // Calculate games per second
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    // Output based on format
    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_selfplay_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} games/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        OutputFormat::Json => {
            let json_result = JsonSelfplayResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_selfplay_csv(&stats));
        }
    }

    Ok(())
}
