//! CLI command implementations for Slide48.

pub(crate) mod play;
pub(crate) mod selfplay;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `selfplay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<slide48::GameError> for CliError {
    fn from(e: slide48::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<slide48::session::SessionError> for CliError {
    fn from(e: slide48::session::SessionError) -> Self {
        Self::new(e.to_string())
    }
}
