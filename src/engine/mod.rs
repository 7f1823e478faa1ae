//! Engine module: rectangular tile board, directions, and the slide/merge
//! transition.
//!
//! - `Board` is the validated `rows x cols` grid with useful methods.
//! - `Move` picks a direction; `Traversal` is how that direction walks lanes.
//! - Free functions (`apply`, `is_game_over`, ...) mirror the methods when convenient.

mod board;
mod direction;
mod transition;

pub use board::{Board, BoardError, Tile};
pub use direction::{Move, ParseMoveError, Traversal};
pub use transition::{apply, is_game_over, is_game_over_par, legal_moves, Transition};
