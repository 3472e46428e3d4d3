//! Move rules and successor generation.
//!
//! Two transition models are supported:
//!
//! - **Adjacent swap**: the gap swaps with one orthogonally adjacent tile.
//! - **Block shift**: an arbitrary run of tiles starting next to the gap
//!   slides toward it in a single transition, so one move can relocate a
//!   whole row or column segment.
//!
//! Every transition costs 1 under both rules, regardless of how many tiles
//! a block shift relocates.

use crate::board::Board;
use crate::search::SearchSpace;

/// Up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Transition model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveRule {
    /// The gap swaps with a single adjacent tile per move.
    #[default]
    AdjacentSwap,
    /// A run of tiles slides into the gap in one unit-cost move.
    BlockShift,
}

impl std::fmt::Display for MoveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRule::AdjacentSwap => write!(f, "adjacent-swap"),
            MoveRule::BlockShift => write!(f, "block-shift"),
        }
    }
}

impl std::str::FromStr for MoveRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adjacent-swap" | "swap" => Ok(MoveRule::AdjacentSwap),
            "block-shift" | "shift" => Ok(MoveRule::BlockShift),
            _ => Err(format!(
                "Unknown move rule: '{}'. Valid options: adjacent-swap, block-shift",
                s
            )),
        }
    }
}

impl Board {
    /// All boards reachable by swapping the gap with one adjacent tile.
    pub fn neighbors_adjacent_swap(&self) -> Vec<Board> {
        let mut neighbors = Vec::with_capacity(4);
        let (gap_row, gap_col) = self.gap_position();
        for (dr, dc) in DIRECTIONS {
            let row = gap_row as isize + dr;
            let col = gap_col as isize + dc;
            if self.in_bounds(row, col) {
                let mut next = self.clone();
                let index = row as usize * self.cols + col as usize;
                next.tiles.swap(next.gap, index);
                next.gap = index;
                neighbors.push(next);
            }
        }
        neighbors
    }

    /// All boards reachable by sliding a run of tiles into the gap.
    ///
    /// Walking outward from the gap in each direction, every prefix of the
    /// run is its own successor: shifting one tile, two tiles, and so on up
    /// to the board edge.
    pub fn neighbors_block_shift(&self) -> Vec<Board> {
        let mut neighbors = Vec::new();
        let (gap_row, gap_col) = self.gap_position();
        for (dr, dc) in DIRECTIONS {
            let mut shifted = self.clone();
            let mut row = gap_row as isize + dr;
            let mut col = gap_col as isize + dc;
            while self.in_bounds(row, col) {
                let tile_index = row as usize * self.cols + col as usize;
                // The previous cell along this direction is the current gap.
                shifted.tiles.swap(tile_index, shifted.gap);
                shifted.gap = tile_index;
                neighbors.push(shifted.clone());
                row += dr;
                col += dc;
            }
        }
        neighbors
    }

    /// Successor boards under the given rule.
    pub fn successors(&self, rule: MoveRule) -> Vec<Board> {
        match rule {
            MoveRule::AdjacentSwap => self.neighbors_adjacent_swap(),
            MoveRule::BlockShift => self.neighbors_block_shift(),
        }
    }
}

/// The sliding-tile puzzle as a pluggable search domain.
#[derive(Debug, Clone, Copy)]
pub struct SlidingPuzzle {
    rule: MoveRule,
}

impl SlidingPuzzle {
    pub fn new(rule: MoveRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> MoveRule {
        self.rule
    }
}

impl SearchSpace for SlidingPuzzle {
    type State = Board;

    fn is_goal(&self, board: &Board) -> bool {
        board.is_goal()
    }

    /// Manhattan distance under both rules. For block shift this can
    /// overestimate the true remaining cost; it is kept anyway as the
    /// established guide for that model.
    fn heuristic(&self, board: &Board) -> u32 {
        board.manhattan_distance()
    }

    fn successors(&self, board: &Board) -> Vec<(Board, u32)> {
        board
            .successors(self.rule)
            .into_iter()
            .map(|next| (next, 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, cols: usize, tiles: &[u16]) -> Board {
        Board::new(rows, cols, tiles.to_vec()).unwrap()
    }

    #[test]
    fn test_adjacent_swap_corner_gap() {
        // Gap in a corner has exactly two neighbors.
        let start = board(2, 2, &[0, 1, 2, 3]);
        let neighbors = start.neighbors_adjacent_swap();
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&board(2, 2, &[2, 1, 0, 3])));
        assert!(neighbors.contains(&board(2, 2, &[1, 0, 2, 3])));
    }

    #[test]
    fn test_adjacent_swap_center_gap() {
        let start = board(3, 3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(start.neighbors_adjacent_swap().len(), 4);
    }

    #[test]
    fn test_adjacent_swap_line() {
        let start = board(1, 3, &[0, 1, 2]);
        let neighbors = start.neighbors_adjacent_swap();
        assert_eq!(neighbors, vec![board(1, 3, &[1, 0, 2])]);
    }

    #[test]
    fn test_block_shift_line_generates_every_prefix() {
        // [., 1, 2] can shift one tile or the whole run.
        let start = board(1, 3, &[0, 1, 2]);
        let neighbors = start.neighbors_block_shift();
        assert_eq!(
            neighbors,
            vec![board(1, 3, &[1, 0, 2]), board(1, 3, &[1, 2, 0])]
        );
    }

    #[test]
    fn test_block_shift_counts_both_axes() {
        // Gap at the center of a 3x3: one tile per direction before the
        // edge, so four single shifts total.
        let start = board(3, 3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(start.neighbors_block_shift().len(), 4);

        // Gap in a corner: runs of length 2 along both the row and the column.
        let corner = board(3, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(corner.neighbors_block_shift().len(), 4);
    }

    #[test]
    fn test_successors_never_mutate_the_source() {
        let start = board(1, 3, &[0, 1, 2]);
        let copy = start.clone();
        let _ = start.successors(MoveRule::BlockShift);
        assert_eq!(start, copy);
    }

    #[test]
    fn test_move_rule_from_str() {
        assert_eq!("adjacent-swap".parse(), Ok(MoveRule::AdjacentSwap));
        assert_eq!("shift".parse(), Ok(MoveRule::BlockShift));
        assert!("diagonal".parse::<MoveRule>().is_err());
    }

    #[test]
    fn test_move_rule_display() {
        assert_eq!(format!("{}", MoveRule::AdjacentSwap), "adjacent-swap");
        assert_eq!(format!("{}", MoveRule::BlockShift), "block-shift");
    }

    #[test]
    fn test_puzzle_model_unit_step_cost() {
        let puzzle = SlidingPuzzle::new(MoveRule::BlockShift);
        let start = board(1, 3, &[0, 1, 2]);
        for (_, step) in puzzle.successors(&start) {
            assert_eq!(step, 1);
        }
        assert_eq!(puzzle.heuristic(&start), 2);
        assert!(!puzzle.is_goal(&start));
        assert!(puzzle.is_goal(&board(1, 3, &[1, 2, 0])));
    }
}
