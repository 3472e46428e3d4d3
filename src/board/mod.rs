//! Sliding-tile board representation.
//!
//! A [`Board`] is an immutable snapshot of a puzzle configuration: an
//! `rows x cols` grid of numbered tiles with a single gap (value `0`).
//! Transitions never mutate a board in place; successor generation in
//! [`moves`] always produces new values. Boards compare by value and can be
//! used as map keys, and their total ordering (dimensions, then tiles
//! lexicographically) gives solutions a stable ordering key.

pub mod moves;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while building or parsing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("expected {expected} cells for a {rows}x{cols} board, got {actual}")]
    WrongCellCount {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell value {value} is out of range for a board with {cells} cells")]
    ValueOutOfRange { value: u16, cells: usize },
    #[error("cell value {value} appears more than once")]
    DuplicateValue { value: u16 },
    #[error("invalid number '{token}' in puzzle input")]
    InvalidToken { token: String },
    #[error("puzzle input ended before all {expected} values were read")]
    TruncatedInput { expected: usize },
}

/// An immutable puzzle configuration.
///
/// The goal configuration places tiles `1..rows*cols` in row-major order
/// with the gap in the last cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) tiles: Vec<u16>,
    /// Index of the gap cell, always kept in sync with `tiles`.
    pub(crate) gap: usize,
}

impl Board {
    /// Build a board from row-major cell values, validating that they form a
    /// permutation of `0..rows*cols` (so there is exactly one gap).
    pub fn new(rows: usize, cols: usize, tiles: Vec<u16>) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        let cells = rows * cols;
        if tiles.len() != cells {
            return Err(BoardError::WrongCellCount {
                rows,
                cols,
                expected: cells,
                actual: tiles.len(),
            });
        }
        let mut seen = vec![false; cells];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(BoardError::ValueOutOfRange { value, cells })?;
            if *slot {
                return Err(BoardError::DuplicateValue { value });
            }
            *slot = true;
        }
        // The permutation check guarantees exactly one zero.
        let gap = tiles.iter().position(|&v| v == 0).unwrap_or(0);
        Ok(Self {
            rows,
            cols,
            tiles,
            gap,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Row and column of the gap cell.
    pub fn gap_position(&self) -> (usize, usize) {
        (self.gap / self.cols, self.gap % self.cols)
    }

    pub(crate) fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// Whether this board is the goal configuration
    /// (`1, 2, ..., rows*cols-1, 0`).
    pub fn is_goal(&self) -> bool {
        let cells = self.rows * self.cols;
        self.tiles[cells - 1] == 0
            && self.tiles[..cells - 1]
                .iter()
                .enumerate()
                .all(|(i, &v)| v as usize == i + 1)
    }

    /// Sum of per-tile Manhattan distances to each tile's goal cell.
    ///
    /// Admissible and consistent when transitions swap the gap with one
    /// adjacent tile. Block-shift transitions can move several tiles at unit
    /// cost, so there this is only an effective guide, not a lower bound.
    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0;
        for (index, &value) in self.tiles.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let goal = value as usize - 1;
            let row = index / self.cols;
            let col = index % self.cols;
            let goal_row = goal / self.cols;
            let goal_col = goal % self.cols;
            distance += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32;
        }
        distance
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the persisted puzzle format: two dimensions followed by
    /// `rows*cols` cell values, separated by arbitrary whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut next_number = |expected: usize| -> Result<usize, BoardError> {
            let token = tokens
                .next()
                .ok_or(BoardError::TruncatedInput { expected })?;
            token.parse().map_err(|_| BoardError::InvalidToken {
                token: token.to_owned(),
            })
        };
        let rows = next_number(2)?;
        let cols = next_number(2)?;
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        let cells = rows * cols;
        let mut tiles = Vec::with_capacity(cells);
        for _ in 0..cells {
            let value = next_number(cells)?;
            if value >= cells {
                return Err(BoardError::ValueOutOfRange {
                    value: value.min(u16::MAX as usize) as u16,
                    cells,
                });
            }
            tiles.push(value as u16);
        }
        Board::new(rows, cols, tiles)
    }
}

impl fmt::Display for Board {
    /// Render the board as an aligned grid with `.` for the gap.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ((self.rows * self.cols - 1).max(1)).to_string().len();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                let value = self.tiles[row * self.cols + col];
                if value == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{value:>width$}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
