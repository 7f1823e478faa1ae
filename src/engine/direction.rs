use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Lane/inner-axis parameters for sliding in this direction.
    #[inline]
    pub fn traversal(self) -> Traversal {
        match self {
            Move::Left => Traversal { along_rows: true, toward_target: -1, away_from_target: 1 },
            Move::Right => Traversal { along_rows: true, toward_target: 1, away_from_target: -1 },
            Move::Up => Traversal { along_rows: false, toward_target: -1, away_from_target: 1 },
            Move::Down => Traversal { along_rows: false, toward_target: 1, away_from_target: -1 },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised move: {0:?}")]
pub struct ParseMoveError(pub String);

/// Accepts `w/a/s/d`, vi keys `k/h/j/l` and the direction names, case-insensitive.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Ok(Move::Up),
            "s" | "j" | "down" => Ok(Move::Down),
            "a" | "h" | "left" => Ok(Move::Left),
            "d" | "l" | "right" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// How a [`Move`] walks the grid.
///
/// A lane is a row when `along_rows` is set, otherwise a column. Inside a lane
/// the traversal starts at the target edge and advances by `away_from_target`;
/// probing steps by `toward_target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    pub along_rows: bool,
    pub toward_target: isize,
    pub away_from_target: isize,
}

impl Traversal {
    /// `(lane count, lane length)` for a `rows x cols` grid.
    #[inline]
    pub fn extent(&self, rows: usize, cols: usize) -> (usize, usize) {
        if self.along_rows { (rows, cols) } else { (cols, rows) }
    }

    /// First inner index visited: the target edge.
    #[inline]
    pub fn start(&self, lane_len: usize) -> isize {
        if self.toward_target < 0 { 0 } else { lane_len as isize - 1 }
    }

    /// Row-major offset of inner position `inner` in `lane`.
    #[inline]
    pub fn offset(&self, lane: usize, inner: usize, cols: usize) -> usize {
        if self.along_rows { lane * cols + inner } else { inner * cols + lane }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_moves_walk_rows() {
        assert!(Move::Left.traversal().along_rows);
        assert!(Move::Right.traversal().along_rows);
        assert!(!Move::Up.traversal().along_rows);
        assert!(!Move::Down.traversal().along_rows);
    }

    #[test]
    fn start_is_target_edge() {
        assert_eq!(Move::Left.traversal().start(5), 0);
        assert_eq!(Move::Up.traversal().start(5), 0);
        assert_eq!(Move::Right.traversal().start(5), 4);
        assert_eq!(Move::Down.traversal().start(3), 2);
    }

    #[test]
    fn steps_are_opposite() {
        for m in Move::ALL {
            let t = m.traversal();
            assert_eq!(t.toward_target, -t.away_from_target);
        }
    }

    #[test]
    fn offset_swaps_for_columns() {
        // 3 rows x 5 cols
        assert_eq!(Move::Left.traversal().offset(1, 2, 5), 7);
        assert_eq!(Move::Up.traversal().offset(1, 2, 5), 11);
        assert_eq!(Move::Up.traversal().extent(3, 5), (5, 3));
        assert_eq!(Move::Right.traversal().extent(3, 5), (3, 5));
    }

    #[test]
    fn parse_moves() {
        assert_eq!("w".parse::<Move>(), Ok(Move::Up));
        assert_eq!(" Left ".parse::<Move>(), Ok(Move::Left));
        assert_eq!("j".parse::<Move>(), Ok(Move::Down));
        assert_eq!("D".parse::<Move>(), Ok(Move::Right));
        assert!("x".parse::<Move>().is_err());
    }
}
