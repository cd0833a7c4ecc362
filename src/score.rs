//! High-score persistence collaborators.
//!
//! The engine only tracks the high score in memory; storing it durably is
//! a collaborator concern. Store failures are non-fatal: the session logs
//! a warning and keeps playing with the in-memory value.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Current score-file format version.
const VERSION: u8 = 1;

/// On-disk payload for the high score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    /// Format version.
    version: u8,
    /// Best score seen so far.
    best: u32,
}

/// Loads the high score at startup and saves it whenever a new best is set.
pub trait HighScoreStore {
    /// Load the persisted high score; absent or unreadable data reads as 0.
    fn load(&self) -> u32;

    /// Persist a new high score.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the score could not be written; callers
    /// treat this as non-fatal.
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// High-score store backed by a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `$HOME/.slide48/highscore.json`.
    ///
    /// Returns `None` when no home directory is available; callers fall
    /// back to an in-memory store.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".slide48").join("highscore.json"))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str::<ScoreFile>(&text).ok())
            .map_or(0, |file| file.best)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&ScoreFile {
            version: VERSION,
            best: score,
        })
        .map_err(io::Error::other)?;
        fs::write(&self.path, payload)
    }
}

/// In-memory store for tests and headless batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        Ok(())
    }
}
