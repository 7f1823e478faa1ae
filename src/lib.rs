//! tile-merge: a sliding-tile merge puzzle engine (the 2048 family) for
//! rectangular boards of any size.
//!
//! This crate provides:
//! - A validated `Board` type with ergonomic methods (`apply`, `shift`, `is_game_over`, ...)
//! - The slide/merge transition (`engine::apply`) returning whether anything
//!   changed and the score gained
//! - A `Game` controller that spawns tiles and keeps score (`game` module)
//! - TOML-backed settings (`config` module)
//!
//! Quick start:
//! ```
//! use tile_merge::engine::{self, Board, Move};
//!
//! let mut b = Board::from_rows(&[
//!     [2u64, 2, 0, 0],
//!     [0, 4, 0, 4],
//!     [0, 0, 0, 0],
//!     [8, 0, 0, 0],
//! ]).unwrap();
//! let t = engine::apply(&mut b, Move::Left);
//! assert!(t.changed);
//! assert_eq!(t.score_gained, 4 + 8);
//! assert_eq!(b.to_rows()[1], vec![8, 0, 0, 0]);
//! assert!(!b.is_game_over());
//! ```
//!
//! Full loop with a seeded game:
//! ```
//! use tile_merge::config::GameConfig;
//! use tile_merge::game::Game;
//!
//! let cfg = GameConfig { rows: 3, cols: 3, seed: Some(123), ..GameConfig::default() };
//! let mut game = Game::new(&cfg).unwrap();
//! let mut moves = 0u32;
//! while moves < 4 {
//!     match game.random_move() {
//!         Some(dir) => { game.step(dir); moves += 1; }
//!         None => break,
//!     }
//! }
//! assert!(moves > 0);
//! let _final_score = game.score();
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
