use std::fmt;

use super::direction::Move;
use super::transition::{self, Transition};

/// A cell value: `0` for empty, otherwise a power of two >= 2.
pub type Tile = u64;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be at least 1x1, got {rows}x{cols}")]
    EmptyDimension { rows: usize, cols: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("invalid tile {value} at ({row}, {col}): must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u64 },
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("board of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
}

/// A `rows x cols` grid of tiles stored row-major. `0` is an empty cell.
///
/// Shape and tile values are checked on construction; every `Board` that
/// exists is a valid input to [`transition::apply`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl Board {
    /// An empty board of the given size.
    ///
    /// ```
    /// use tile_merge::engine::Board;
    /// let b = Board::new(4, 4).unwrap();
    /// assert_eq!(b.count_empty(), 16);
    /// assert!(Board::new(0, 4).is_err());
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyDimension { rows, cols });
        }
        let len = rows.checked_mul(cols).ok_or(BoardError::TooLarge { rows, cols })?;
        Ok(Board { rows, cols, cells: vec![0; len] })
    }

    /// Build a board from explicit rows, rejecting ragged or empty input and
    /// values that are not tiles.
    ///
    /// ```
    /// use tile_merge::engine::{Board, Move};
    /// let mut b = Board::from_rows(&[[2u64, 2, 0, 0]]).unwrap();
    /// let t = b.apply(Move::Left);
    /// assert_eq!(b.to_rows(), vec![vec![4, 0, 0, 0]]);
    /// assert_eq!(t.score_gained, 4);
    /// ```
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, BoardError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if n_rows == 0 || n_cols == 0 {
            return Err(BoardError::EmptyDimension { rows: n_rows, cols: n_cols });
        }
        let len = n_rows
            .checked_mul(n_cols)
            .ok_or(BoardError::TooLarge { rows: n_rows, cols: n_cols })?;
        let mut cells = Vec::with_capacity(len);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != n_cols {
                return Err(BoardError::Ragged { row, expected: n_cols, found: r.len() });
            }
            for (col, &value) in r.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
                cells.push(value);
            }
        }
        Ok(Board { rows: n_rows, cols: n_cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize { self.rows }

    #[inline]
    pub fn cols(&self) -> usize { self.cols }

    /// Row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[Tile] { &self.cells }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] { &mut self.cells }

    /// Tile at `(row, col)`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Overwrite one cell with a valid tile value (or `0` to clear it).
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> Result<(), BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds { row, col });
        }
        if !is_valid_tile(value) {
            return Err(BoardError::InvalidTile { row, col, value });
        }
        self.cells[row * self.cols + col] = value;
        Ok(())
    }

    /// Copy the cells out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// Slide/merge in place. See [`transition::apply`].
    #[inline]
    pub fn apply(&mut self, dir: Move) -> Transition {
        transition::apply(self, dir)
    }

    /// Return the board resulting from sliding/merging in `dir`, leaving `self` untouched.
    #[inline]
    pub fn shift(&self, dir: Move) -> (Board, Transition) {
        let mut next = self.clone();
        let t = transition::apply(&mut next, dir);
        (next, t)
    }

    /// Return true if no direction changes the board.
    #[inline]
    pub fn is_game_over(&self) -> bool { transition::is_game_over(self) }

    /// Coordinates of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    #[inline]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Highest tile on the board, `0` when empty.
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.cells.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.cols * 8 - 1);
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f, "{}", rule)?;
            }
            let line: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{:^7}", x),
    }
}
