//! Game state and the turn sequence.

use crate::engine::grid::Grid;
use crate::engine::moves::{apply_move, has_any_move, Direction};
use crate::engine::rng::Rng;
use crate::engine::spawn::spawn;
use crate::error::{GameError, GameResult};

/// Number of tiles spawned onto a fresh board.
const INITIAL_SPAWNS: usize = 2;

/// Tunable rules for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the board.
    pub size: usize,
    /// Tile value that ends the game in a win.
    pub win_threshold: u32,
    /// Percent chance that a spawned tile is a 4 instead of a 2.
    pub four_tile_percent: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            win_threshold: 2048,
            four_tile_percent: 10,
        }
    }
}

impl GameConfig {
    /// Check the configuration against the engine's rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero board size, a win
    /// threshold that is not a power of two ≥ 4, or a spawn chance above
    /// 100 percent.
    pub fn validate(&self) -> GameResult<()> {
        if self.size == 0 {
            return Err(GameError::InvalidConfiguration(
                "grid size must be non-zero",
            ));
        }
        if self.win_threshold < 4 || !self.win_threshold.is_power_of_two() {
            return Err(GameError::InvalidConfiguration(
                "win threshold must be a power of two >= 4",
            ));
        }
        if self.four_tile_percent > 100 {
            return Err(GameError::InvalidConfiguration(
                "four-tile chance must be a percentage <= 100",
            ));
        }
        Ok(())
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Accepting direction input.
    Playing,
    /// The win threshold was reached; only restart is accepted.
    Won,
    /// No legal move remains; only restart is accepted.
    Lost,
}

impl Status {
    /// Check whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

/// What one call to [`GameState::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whether the board changed.
    pub moved: bool,
    /// Score gained this turn.
    pub score_delta: u32,
    /// Cell a new tile was spawned into, if any.
    pub spawned: Option<(usize, usize)>,
    /// Status after the turn.
    pub status: Status,
}

/// Complete state of one game in progress.
///
/// Owns exactly one board at a time. The move and spawn operations are pure
/// functions over board snapshots; this type folds their results into the
/// running score, high score, and lifecycle status.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    score: u32,
    high_score: u32,
    status: Status,
    rng: Rng,
}

impl GameState {
    /// Start a new game.
    ///
    /// The board opens with exactly two spawned tiles. `high_score` seeds
    /// the session best, typically loaded by a persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration is rejected; no
    /// game starts in that case.
    pub fn new(config: GameConfig, seed: u64, high_score: u32) -> GameResult<Self> {
        config.validate()?;

        let mut rng = Rng::new(seed);
        let grid = Self::fresh_grid(config, &mut rng)?;

        // A degenerate board (1×1) can open with no legal move
        let status = if has_any_move(&grid) {
            Status::Playing
        } else {
            Status::Lost
        };

        Ok(Self {
            config,
            grid,
            score: 0,
            high_score,
            status,
            rng,
        })
    }

    /// Build an opening board with the initial spawned tiles.
    fn fresh_grid(config: GameConfig, rng: &mut Rng) -> GameResult<Grid> {
        let mut grid = Grid::new(config.size)?;
        for _ in 0..INITIAL_SPAWNS.min(config.size * config.size) {
            spawn(&mut grid, rng, config.four_tile_percent)?;
        }
        Ok(grid)
    }

    /// Get the board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Get the session high score.
    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Get the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Get the configuration the game was started with.
    #[must_use]
    pub const fn config(&self) -> GameConfig {
        self.config
    }

    /// Play one turn: move, then spawn, then check terminal conditions.
    ///
    /// While terminal (`Won`/`Lost`), direction input is ignored and the
    /// turn is a no-op. A move that changes nothing is also a no-op: no
    /// score change and no spawn.
    ///
    /// # Errors
    ///
    /// Returns `NoEmptyCell` only on an internal invariant failure (a spawn
    /// attempted on a full board); correct move/loss ordering makes this
    /// unreachable.
    pub fn step(&mut self, direction: Direction) -> GameResult<TurnOutcome> {
        if self.status.is_terminal() {
            return Ok(TurnOutcome {
                moved: false,
                score_delta: 0,
                spawned: None,
                status: self.status,
            });
        }

        let result = apply_move(&self.grid, direction);
        if !result.moved {
            return Ok(TurnOutcome {
                moved: false,
                score_delta: 0,
                spawned: None,
                status: self.status,
            });
        }

        self.grid = result.grid;
        self.score += result.score_delta;
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        let mut spawned = None;
        if self.grid.max_tile() >= self.config.win_threshold {
            // Win is detected before the spawn; no tile appears this turn
            self.status = Status::Won;
        } else {
            spawned = Some(spawn(
                &mut self.grid,
                &mut self.rng,
                self.config.four_tile_percent,
            )?);
            if !has_any_move(&self.grid) {
                self.status = Status::Lost;
            }
        }

        Ok(TurnOutcome {
            moved: true,
            score_delta: result.score_delta,
            spawned,
            status: self.status,
        })
    }

    /// Restart with a fresh board.
    ///
    /// Valid from any state. The score resets; the session high score
    /// survives.
    ///
    /// # Errors
    ///
    /// Returns an error only if the opening spawns fail, which a validated
    /// configuration rules out.
    pub fn restart(&mut self) -> GameResult<()> {
        self.grid = Self::fresh_grid(self.config, &mut self.rng)?;
        self.score = 0;
        self.status = if has_any_move(&self.grid) {
            Status::Playing
        } else {
            Status::Lost
        };
        Ok(())
    }
}
