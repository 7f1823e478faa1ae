//! Game controller: owns a board, the running score and the RNG used to
//! spawn tiles after every move that changes the board.
//!
//! ```
//! use tile_merge::config::GameConfig;
//! use tile_merge::engine::Move;
//! use tile_merge::game::Game;
//!
//! let cfg = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut game = Game::new(&cfg).unwrap();
//! assert_eq!(game.board().count_empty(), 15);
//! for dir in Move::ALL.iter().cycle().take(8) {
//!     game.step(*dir);
//! }
//! assert!(game.board().highest_tile() >= 2);
//! ```

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::engine::{self, Board, Move, Tile};

/// Where a tile was spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Result of [`Game::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub changed: bool,
    pub score_gained: u64,
    /// Tile placed after the move; `None` when the move changed nothing.
    pub spawned: Option<Spawn>,
    pub game_over: bool,
}

pub struct Game<R = StdRng> {
    board: Board,
    score: u64,
    moves: u64,
    four_probability: f64,
    over: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Start a game from `cfg`, seeding from `cfg.seed` or from entropy.
    pub fn new(cfg: &GameConfig) -> Result<Self, ConfigError> {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }
}

impl<R: Rng> Game<R> {
    /// Start a game on an empty board with `cfg.initial_tiles` tiles spawned.
    pub fn with_rng(cfg: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let board = Board::new(cfg.rows, cfg.cols)?;
        let mut game = Self::from_parts(board, cfg.four_probability, rng);
        for _ in 0..cfg.initial_tiles {
            game.spawn_tile();
        }
        game.over = game.board.is_game_over();
        Ok(game)
    }

    /// Continue from an existing board. Nothing is spawned.
    pub fn from_board(board: Board, four_probability: f64, rng: R) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&four_probability) {
            return Err(ConfigError::Invalid(format!(
                "four_probability must be within [0, 1], got {four_probability}"
            )));
        }
        let mut game = Self::from_parts(board, four_probability, rng);
        game.over = game.board.is_game_over();
        Ok(game)
    }

    fn from_parts(board: Board, four_probability: f64, rng: R) -> Self {
        Game { board, score: 0, moves: 0, four_probability, over: false, rng }
    }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    /// Moves that changed the board.
    #[inline]
    pub fn moves(&self) -> u64 { self.moves }

    #[inline]
    pub fn is_over(&self) -> bool { self.over }

    /// Slide/merge in `dir`; if anything changed, bank the score and spawn a tile.
    pub fn step(&mut self, dir: Move) -> StepOutcome {
        if self.over {
            return StepOutcome { changed: false, score_gained: 0, spawned: None, game_over: true };
        }

        let t = engine::apply(&mut self.board, dir);
        let mut spawned = None;
        if t.changed {
            self.score = self.score.saturating_add(t.score_gained);
            self.moves += 1;
            spawned = self.spawn_tile();
            debug!("move {} {}: +{} (score {})", self.moves, dir, t.score_gained, self.score);
        } else {
            trace!("{} left the board unchanged", dir);
        }

        self.over = self.board.is_game_over();
        if self.over {
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.board.highest_tile()
            );
        }
        StepOutcome {
            changed: t.changed,
            score_gained: t.score_gained,
            spawned,
            game_over: self.over,
        }
    }

    /// Place a 2 (or a 4, with `four_probability`) in a uniformly chosen empty cell.
    pub fn spawn_tile(&mut self) -> Option<Spawn> {
        let empty = self.board.empty_cells();
        let &(row, col) = empty.choose(&mut self.rng)?;
        let value = if self.rng.gen_bool(self.four_probability) { 4 } else { 2 };
        let cols = self.board.cols();
        self.board.cells_mut()[row * cols + col] = value;
        trace!("spawned {} at ({}, {})", value, row, col);
        Some(Spawn { row, col, value })
    }

    /// Uniform pick among the moves that would change the board.
    pub fn random_move(&mut self) -> Option<Move> {
        engine::legal_moves(&self.board).choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(cfg: GameConfig) -> Game {
        Game::new(&GameConfig { seed: Some(7), ..cfg }).unwrap()
    }

    #[test]
    fn starts_with_initial_tiles() {
        let game = seeded(GameConfig::default());
        assert_eq!(game.board().count_empty(), 15);
        assert_eq!((game.score(), game.moves()), (0, 0));
        assert!(!game.is_over());

        let cfg = GameConfig { rows: 3, cols: 5, initial_tiles: 4, ..GameConfig::default() };
        let game = seeded(cfg);
        assert_eq!((game.board().rows(), game.board().cols()), (3, 5));
        assert_eq!(game.board().count_empty(), 11);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = seeded(GameConfig::default());
        let mut b = seeded(GameConfig::default());
        for dir in [Move::Left, Move::Up, Move::Right, Move::Down, Move::Left] {
            assert_eq!(a.step(dir), b.step(dir));
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn spawn_probability_extremes() {
        let cfg = GameConfig { initial_tiles: 16, four_probability: 1.0, ..GameConfig::default() };
        let game = seeded(cfg);
        assert!(game.board().cells().iter().all(|&v| v == 4));

        let cfg = GameConfig { initial_tiles: 16, four_probability: 0.0, ..GameConfig::default() };
        let mut game = seeded(cfg);
        assert!(game.board().cells().iter().all(|&v| v == 2));
        assert_eq!(game.spawn_tile(), None);
    }

    #[test]
    fn step_banks_score_and_spawns() {
        let board = Board::from_rows(&[[2u64, 2, 0, 0], [0, 0, 0, 0]]).unwrap();
        let mut game = Game::from_board(board, 0.0, StdRng::seed_from_u64(1)).unwrap();
        let out = game.step(Move::Left);
        assert!(out.changed);
        assert_eq!(out.score_gained, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.moves(), 1);
        let spawn = out.spawned.unwrap();
        assert_eq!(spawn.value, 2);
        assert_eq!(game.board().get(spawn.row, spawn.col), Some(2));
        assert_eq!(game.board().get(0, 0), Some(4));
        assert_eq!(game.board().count_empty(), 6);
    }

    #[test]
    fn unchanged_step_spawns_nothing() {
        let board = Board::from_rows(&[[2u64, 4, 0, 0]]).unwrap();
        let mut game = Game::from_board(board, 0.0, StdRng::seed_from_u64(1)).unwrap();
        let out = game.step(Move::Left);
        let unchanged =
            StepOutcome { changed: false, score_gained: 0, spawned: None, game_over: false };
        assert_eq!(out, unchanged);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.board().to_rows(), vec![vec![2, 4, 0, 0]]);
    }

    #[test]
    fn finished_game_ignores_moves() {
        let board = Board::from_rows(&[[2u64, 4], [4, 2]]).unwrap();
        let mut game = Game::from_board(board, 0.0, StdRng::seed_from_u64(1)).unwrap();
        assert!(game.is_over());
        assert_eq!(game.random_move(), None);
        let out = game.step(Move::Up);
        assert!(out.game_over && !out.changed);
    }

    #[test]
    fn spawn_lands_in_only_empty_cell() {
        let board = Board::from_rows(&[[4u64, 4, 8], [8, 16, 32]]).unwrap();
        let mut game = Game::from_board(board, 0.0, StdRng::seed_from_u64(3)).unwrap();
        let out = game.step(Move::Left);
        assert!(out.changed);
        assert_eq!(out.spawned.map(|s| (s.row, s.col)), Some((0, 2)));
        assert_eq!(game.board().to_rows(), vec![vec![8, 8, 2], vec![8, 16, 32]]);
        assert!(!out.game_over);
    }

    #[test]
    fn oversized_board_is_an_error() {
        let cfg = GameConfig {
            rows: usize::MAX / 2,
            cols: 4,
            seed: Some(1),
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(&cfg),
            Err(ConfigError::Board(engine::BoardError::TooLarge { .. }))
        ));
    }

    #[test]
    fn rejects_bad_probability() {
        let board = Board::new(2, 2).unwrap();
        assert!(Game::from_board(board, -0.1, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn random_play_terminates() {
        let mut game = seeded(GameConfig { rows: 3, cols: 3, ..GameConfig::default() });
        let mut guard = 0;
        while let Some(dir) = game.random_move() {
            let out = game.step(dir);
            assert!(out.changed);
            guard += 1;
            assert!(guard < 100_000);
        }
        assert!(game.is_over());
        assert!(game.board().highest_tile() >= 4);
    }
}
