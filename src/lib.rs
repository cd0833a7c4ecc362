// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Slide48: a 2048 engine with interchangeable front ends.
//!
//! This crate provides a sliding-tile game engine designed for:
//! - Seed-reproducible games
//! - A backend-agnostic core driven through a narrow front-end contract
//! - Terminal and host-embedded front ends sharing one frame loop
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Backends (terminal, queued host)  │
//! ├─────────────────────────────────────┤
//! │     Frame loop (session)            │
//! ├─────────────────────────────────────┤
//! │  Engine (grid, moves, spawn, state) │
//! └─────────────────────────────────────┘
//! ```

pub mod backend;
pub mod engine;
pub mod error;
pub mod score;
pub mod session;

pub use error::{GameError, GameResult};

// Re-export key engine types at crate root for convenience
pub use engine::{
    apply_move, spawn, Direction, GameConfig, GameState, Grid, MoveResult, Status,
};
