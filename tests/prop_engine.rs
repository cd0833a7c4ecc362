//! Property-based tests for the game engine.
//!
//! These tests verify the move, spawn, and state-machine contracts over
//! randomized boards. Run with: cargo test --release prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use slide48::engine::{
    apply_move, check_invariants, spawn, Direction, GameConfig, GameState, Grid, Rng,
};

/// Strategy: a legal tile value (empty or a small power of two).
fn tile_value() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        2 => (1u32..=11).prop_map(|e| 1 << e),
    ]
}

/// Strategy: a board of the given side length filled with legal tiles.
fn grid_of(size: usize) -> impl Strategy<Value = Grid> {
    prop::collection::vec(tile_value(), size * size).prop_map(move |values| {
        let mut grid = Grid::new(size).unwrap();
        for (idx, value) in values.into_iter().enumerate() {
            grid.set(idx / size, idx % size, value).unwrap();
        }
        grid
    })
}

/// Strategy: any of the four directions.
fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Reference collapse of one line, written independently of the engine.
fn naive_collapse(line: &[u32]) -> (Vec<u32>, u32) {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::new();
    let mut gained = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out.push(tiles[i] * 2);
            gained += tiles[i] * 2;
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }
    out.resize(line.len(), 0);
    (out, gained)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// A move at its own fixed point changes nothing: applying the same
    /// direction twice without a spawn leaves the second application inert.
    #[test]
    fn prop_move_idempotent_at_fixed_point(grid in grid_of(4), dir in direction()) {
        let first = apply_move(&grid, dir);
        let second = apply_move(&first.grid, dir);

        prop_assert!(!second.moved, "second application changed the board");
        prop_assert_eq!(second.score_delta, 0u32);
        prop_assert_eq!(&second.grid, &first.grid);
    }

    /// Moves conserve the total tile mass: merging two equal tiles into
    /// their double changes no sums.
    #[test]
    fn prop_move_conserves_tile_sum(grid in grid_of(4), dir in direction()) {
        let before: u64 = grid.iter().map(|(_, _, v)| u64::from(v)).sum();
        let result = apply_move(&grid, dir);
        let after: u64 = result.grid.iter().map(|(_, _, v)| u64::from(v)).sum();

        prop_assert_eq!(before, after);
    }

    /// An unchanged move reports no score and returns the identical board.
    #[test]
    fn prop_unmoved_means_untouched(grid in grid_of(4), dir in direction()) {
        let result = apply_move(&grid, dir);
        if !result.moved {
            prop_assert_eq!(result.score_delta, 0u32);
            prop_assert_eq!(&result.grid, &grid);
        }
    }

    /// Merge count per move never exceeds floor(N/2) merges per line.
    #[test]
    fn prop_merge_count_bounded(grid in grid_of(4), dir in direction()) {
        let nonzero_before = 16 - grid.empty_cells().count();
        let result = apply_move(&grid, dir);
        let nonzero_after = 16 - result.grid.empty_cells().count();

        // Each merge removes exactly one non-zero tile
        let merges = nonzero_before - nonzero_after;
        prop_assert!(merges <= 4 * 2, "{merges} merges on a 4x4 board");
    }

    /// A single-row board moved Left matches an independent reference
    /// collapse, score delta included.
    #[test]
    fn prop_line_collapse_matches_reference(
        line in prop::collection::vec(tile_value(), 5)
    ) {
        let size = line.len();
        let mut grid = Grid::new(size).unwrap();
        for (col, &value) in line.iter().enumerate() {
            grid.set(0, col, value).unwrap();
        }

        let result = apply_move(&grid, Direction::Left);
        let (expected, gained) = naive_collapse(&line);

        let got: Vec<u32> = (0..size).map(|col| result.grid.get(0, col).unwrap()).collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(result.score_delta, gained);
    }

    /// Spawn fills exactly one previously empty cell with a 2 or a 4 and
    /// touches nothing else.
    #[test]
    fn prop_spawn_fills_one_empty_cell(grid in grid_of(4), seed in any::<u64>()) {
        prop_assume!(grid.empty_cells().count() > 0);

        let mut board = grid.clone();
        let mut rng = Rng::new(seed);
        let (row, col) = spawn(&mut board, &mut rng, 10).unwrap();

        prop_assert_eq!(grid.get(row, col).unwrap(), 0u32, "spawn target was occupied");
        let placed = board.get(row, col).unwrap();
        prop_assert!(placed == 2 || placed == 4);

        for (r, c, value) in grid.iter() {
            if (r, c) != (row, col) {
                prop_assert_eq!(board.get(r, c).unwrap(), value);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// All reachable states keep the engine invariants: every tile a power
    /// of two, status consistent with the board.
    #[test]
    fn prop_invariants_hold_over_random_games(seed in any::<u64>(), moves in 1usize..150) {
        let mut state = GameState::new(GameConfig::default(), seed, 0).unwrap();
        let mut policy = Rng::new(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        for _ in 0..moves {
            if state.status().is_terminal() {
                break;
            }
            #[allow(clippy::cast_possible_truncation)]
            let dir = Direction::ALL[policy.next_u32(4) as usize];
            state.step(dir).unwrap();

            let violations = check_invariants(&state);
            prop_assert!(violations.is_empty(), "violations: {:?}", violations);
        }
    }

    /// The same seed and input sequence reproduce the same game.
    #[test]
    fn prop_same_seed_same_game(seed in any::<u64>(), moves in 1usize..100) {
        let play = |seed: u64| {
            let mut state = GameState::new(GameConfig::default(), seed, 0).unwrap();
            let mut policy = Rng::new(seed ^ 0xDEAD_BEEF);
            for _ in 0..moves {
                if state.status().is_terminal() {
                    break;
                }
                #[allow(clippy::cast_possible_truncation)]
                let dir = Direction::ALL[policy.next_u32(4) as usize];
                state.step(dir).unwrap();
            }
            state
        };

        let a = play(seed);
        let b = play(seed);
        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(a.score(), b.score());
        prop_assert_eq!(a.status(), b.status());
    }

    /// Scores only grow, and the high score tracks the running maximum.
    #[test]
    fn prop_score_monotonic(seed in any::<u64>(), moves in 1usize..100) {
        let mut state = GameState::new(GameConfig::default(), seed, 0).unwrap();
        let mut policy = Rng::new(!seed);
        let mut last_score = 0u32;

        for _ in 0..moves {
            if state.status().is_terminal() {
                break;
            }
            #[allow(clippy::cast_possible_truncation)]
            let dir = Direction::ALL[policy.next_u32(4) as usize];
            state.step(dir).unwrap();

            prop_assert!(state.score() >= last_score);
            prop_assert!(state.high_score() >= state.score());
            last_score = state.score();
        }
    }
}
