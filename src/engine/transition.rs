use rayon::prelude::*;

use super::board::Board;
use super::direction::{Move, Traversal};

/// Outcome of one slide/merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// Some tile moved or merged.
    pub changed: bool,
    /// Sum of the tiles created by merges in this pass.
    pub score_gained: u64,
}

/// Slide and merge every lane of `board` toward `dir`'s target edge.
///
/// Lanes are walked from the target edge outward. Each tile probes toward the
/// edge over empty cells; it merges into the cell that stopped the probe when
/// the values match and that cell has not already absorbed a merge in this
/// lane, otherwise it comes to rest just short of it.
///
/// ```
/// use tile_merge::engine::{self, Board, Move};
/// let mut b = Board::from_rows(&[[2u64, 0, 2, 2]]).unwrap();
/// let t = engine::apply(&mut b, Move::Left);
/// assert_eq!(b.to_rows(), vec![vec![4, 2, 0, 0]]);
/// assert!(t.changed);
/// assert_eq!(t.score_gained, 4);
/// ```
pub fn apply(board: &mut Board, dir: Move) -> Transition {
    let trav = dir.traversal();
    let cols = board.cols();
    let (lanes, lane_len) = trav.extent(board.rows(), cols);
    let cells = board.cells_mut();
    let mut out = Transition::default();

    for lane in 0..lanes {
        shift_lane(cells, &trav, lane, lane_len, cols, &mut out);
    }
    out
}

fn shift_lane(
    cells: &mut [u64],
    trav: &Traversal,
    lane: usize,
    lane_len: usize,
    cols: usize,
    out: &mut Transition,
) {
    let in_bounds = |j: isize| 0 <= j && j < lane_len as isize;
    let at = |j: isize| trav.offset(lane, j as usize, cols);
    // Position that already absorbed a merge in this lane.
    let mut merged_at: Option<isize> = None;

    let mut j = trav.start(lane_len);
    while in_bounds(j) {
        let value = cells[at(j)];
        if value != 0 {
            let mut probe = j + trav.toward_target;
            while in_bounds(probe) && cells[at(probe)] == 0 {
                probe += trav.toward_target;
            }

            let can_merge =
                in_bounds(probe) && cells[at(probe)] == value && merged_at != Some(probe);
            // A tile at the top of the u64 range has nothing to merge into.
            match value.checked_mul(2) {
                Some(merged) if can_merge => {
                    cells[at(probe)] = merged;
                    cells[at(j)] = 0;
                    merged_at = Some(probe);
                    out.changed = true;
                    out.score_gained = out.score_gained.saturating_add(merged);
                }
                _ => {
                    let rest = probe - trav.toward_target;
                    if rest != j {
                        cells[at(j)] = 0;
                        cells[at(rest)] = value;
                        out.changed = true;
                    }
                }
            }
        }
        j += trav.away_from_target;
    }
}

/// True if no move in any direction changes the board.
///
/// Probes run in order on scratch copies and stop at the first direction that
/// changes something.
///
/// ```
/// use tile_merge::engine::{self, Board};
/// // An empty board cannot change, so it counts as over.
/// assert!(engine::is_game_over(&Board::new(4, 4).unwrap()));
/// let b = Board::from_rows(&[[2u64, 4], [4, 2]]).unwrap();
/// assert!(engine::is_game_over(&b));
/// ```
pub fn is_game_over(board: &Board) -> bool {
    for dir in [Move::Down, Move::Up, Move::Left, Move::Right] {
        let mut scratch = board.clone();
        if apply(&mut scratch, dir).changed {
            return false;
        }
    }
    true
}

/// Same answer as [`is_game_over`], with the four probes run on rayon's pool.
pub fn is_game_over_par(board: &Board) -> bool {
    !Move::ALL.par_iter().any(|&dir| {
        let mut scratch = board.clone();
        apply(&mut scratch, dir).changed
    })
}

/// Directions that would change the board, in [`Move::ALL`] order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    Move::ALL
        .iter()
        .copied()
        .filter(|&dir| {
            let mut scratch = board.clone();
            apply(&mut scratch, dir).changed
        })
        .collect()
}
