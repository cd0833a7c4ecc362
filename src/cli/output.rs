//! Output formatting utilities for CLI.

// Statistics intentionally average integers in floating point
#![allow(clippy::cast_precision_loss)]

use super::selfplay::GameRecord;
use serde::Serialize;
use slide48::Status;
use std::collections::BTreeMap;

/// Aggregated statistics over a batch of selfplay games.
#[derive(Debug, Default)]
pub(super) struct SelfplayStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that reached the win threshold.
    pub(super) wins: u64,
    /// Games that ran out of legal moves.
    pub(super) losses: u64,
    /// Games cut off by the turn cap while still playing.
    pub(super) unfinished: u64,
    /// Best final score seen.
    pub(super) best_score: u32,
    /// Total score across games.
    total_score: u64,
    /// Score sum of squares for std dev calculation.
    score_sq_sum: f64,
    /// Total board-changing turns across games.
    total_turns: u64,
    /// Count of games per largest tile reached.
    max_tiles: BTreeMap<u32, u64>,
}

impl SelfplayStats {
    /// Create empty stats.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Fold one game into the stats.
    pub(super) fn add_record(&mut self, record: &GameRecord) {
        self.games_played += 1;
        self.total_turns += record.turns;

        match record.status {
            Status::Won => self.wins += 1,
            Status::Lost => self.losses += 1,
            Status::Playing => self.unfinished += 1,
        }

        self.best_score = self.best_score.max(record.score);
        self.total_score += u64::from(record.score);
        let score = f64::from(record.score);
        self.score_sq_sum += score * score;

        *self.max_tiles.entry(record.max_tile).or_insert(0) += 1;
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.losses += other.losses;
        self.unfinished += other.unfinished;
        self.best_score = self.best_score.max(other.best_score);
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.total_turns += other.total_turns;
        for (&tile, &count) in &other.max_tiles {
            *self.max_tiles.entry(tile).or_insert(0) += count;
        }
    }

    /// Win rate over played games (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64
    }

    /// Average final score.
    pub(super) fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Score standard deviation.
    pub(super) fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_score();
        let variance = (self.score_sq_sum / n) - (mean * mean);
        if variance < 0.0 {
            0.0
        } else {
            variance.sqrt()
        }
    }

    /// Average game length in board-changing turns.
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Share of games whose largest tile was `tile`.
    fn tile_share(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 / self.games_played as f64
    }

    /// Largest-tile distribution, ascending by tile.
    pub(super) fn max_tile_rows(&self) -> impl Iterator<Item = (u32, u64, f64)> + '_ {
        self.max_tiles
            .iter()
            .map(|(&tile, &count)| (tile, count, self.tile_share(count)))
    }
}

/// JSON-serializable selfplay result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSelfplayResult {
    /// Total games played.
    games_played: u64,
    /// Games won.
    wins: u64,
    /// Games lost.
    losses: u64,
    /// Games cut off by the turn cap.
    unfinished: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average final score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Best final score.
    best_score: u32,
    /// Average game length in turns.
    avg_turns: f64,
    /// Largest-tile distribution.
    max_tiles: Vec<JsonMaxTile>,
}

/// JSON-serializable largest-tile bucket.
#[derive(Debug, Serialize)]
pub(super) struct JsonMaxTile {
    /// Largest tile reached.
    tile: u32,
    /// Number of games.
    count: u64,
    /// Share of all games (0.0-1.0).
    share: f64,
}

impl JsonSelfplayResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &SelfplayStats) -> Self {
        Self {
            games_played: stats.games_played,
            wins: stats.wins,
            losses: stats.losses,
            unfinished: stats.unfinished,
            win_rate: stats.win_rate(),
            avg_score: stats.avg_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            avg_turns: stats.avg_turns(),
            max_tiles: stats
                .max_tile_rows()
                .map(|(tile, count, share)| JsonMaxTile { tile, count, share })
                .collect(),
        }
    }
}

/// Format selfplay stats as human-readable text.
pub(super) fn format_selfplay_text(stats: &SelfplayStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Selfplay Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Outcomes:\n");
    output.push_str(&format!(
        "  Wins: {} ({:.1}%)\n",
        stats.wins,
        stats.win_rate() * 100.0
    ));
    output.push_str(&format!("  Losses: {}\n", stats.losses));
    if stats.unfinished > 0 {
        output.push_str(&format!("  Unfinished (turn cap): {}\n", stats.unfinished));
    }

    output.push_str("\nScores:\n");
    output.push_str(&format!(
        "  Average: {:.1} (+/- {:.1})\n",
        stats.avg_score(),
        stats.score_std_dev()
    ));
    output.push_str(&format!("  Best: {}\n", stats.best_score));

    output.push_str("\nLargest Tile Reached:\n");
    for (tile, count, share) in stats.max_tile_rows() {
        output.push_str(&format!(
            "  {:>6}: {} ({:.1}%)\n",
            tile,
            count,
            share * 100.0
        ));
    }

    output.push_str(&format!(
        "\nAverage Game Length: {:.0} turns\n",
        stats.avg_turns()
    ));

    output
}

/// Format selfplay stats as CSV (largest-tile distribution).
pub(super) fn format_selfplay_csv(stats: &SelfplayStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("max_tile,count,share\n");

    // Data rows
    for (tile, count, share) in stats.max_tile_rows() {
        output.push_str(&format!("{tile},{count},{share:.4}\n"));
    }

    output
}
