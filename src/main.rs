//! Slide48 CLI - Command-line interface for playing and analyzing games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Slide48 - a 2048 clone with a backend-agnostic engine
#[derive(Parser, Debug)]
#[command(name = "slide48")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// Board side length
        #[arg(long, default_value = "4")]
        size: usize,

        /// Tile value that ends the game in a win
        #[arg(long, default_value = "2048")]
        win: u32,

        /// Percent chance that a spawned tile is a 4
        #[arg(long, default_value = "10")]
        four_percent: u8,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// High-score file (default: $HOME/.slide48/highscore.json)
        #[arg(long)]
        score_file: Option<std::path::PathBuf>,
    },

    /// Run mass random-policy games and aggregate statistics
    Selfplay {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board side length
        #[arg(long, default_value = "4")]
        size: usize,

        /// Tile value that ends the game in a win
        #[arg(long, default_value = "2048")]
        win: u32,

        /// Percent chance that a spawned tile is a 4
        #[arg(long, default_value = "10")]
        four_percent: u8,

        /// Cap on input symbols fed to a single game
        #[arg(long, default_value = "100000")]
        max_turns: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            size,
            win,
            four_percent,
            seed,
            score_file,
        } => cli::play::execute(size, win, four_percent, seed, score_file),

        Commands::Selfplay {
            games,
            seed,
            size,
            win,
            four_percent,
            max_turns,
            threads,
            format,
            progress,
        } => cli::selfplay::execute(
            games,
            seed,
            size,
            win,
            four_percent,
            max_turns,
            threads,
            format,
            progress,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
