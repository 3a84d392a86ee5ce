use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::BalanceError;
use crate::config::constants::{EMPTY_CELL, TOLERANCE_DIVISOR, VOID_CELL};

/// One addressable slot position in the hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPos {
    pub row: usize,
    pub col: usize,
}

impl SlotPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SlotPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The left or right partition of columns, split at `cols / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Left,
    Right,
}

/// The hold matrix and its derived weight sums.
///
/// Cell values: `0` empty, `VOID_CELL` a structural void (never counted,
/// never traversable, never a destination), any positive value the weight of
/// the item occupying the slot. Mutated in place by every move; constructed
/// once per balancing run.
#[derive(Debug, Clone)]
pub struct HoldGrid {
    cells: Vec<Vec<i32>>,
    rows: usize,
    cols: usize,
    left_sum: i32,
    right_sum: i32,
    total_sum: i32,
}

impl HoldGrid {
    pub fn new(cells: Vec<Vec<i32>>) -> Result<Self, BalanceError> {
        let rows = cells.len();
        if rows == 0 {
            return Err(BalanceError::InvalidGrid("grid has no rows".to_string()));
        }
        let cols = cells[0].len();
        if cols == 0 {
            return Err(BalanceError::InvalidGrid("grid has no columns".to_string()));
        }
        for (r, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(BalanceError::InvalidGrid(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                if value < VOID_CELL {
                    return Err(BalanceError::InvalidGrid(format!(
                        "cell ({}, {}) holds {}; expected -1, 0 or a positive weight",
                        r, c, value
                    )));
                }
            }
        }

        let mut grid = Self {
            cells,
            rows,
            cols,
            left_sum: 0,
            right_sum: 0,
            total_sum: 0,
        };
        grid.recompute_sums();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// First column of the right half. Columns `[0, half_col)` are the left
    /// half; the same split is used for sums, candidate scans and targets.
    pub fn half_col(&self) -> usize {
        self.cols / 2
    }

    pub fn half_of(&self, col: usize) -> Half {
        if col < self.half_col() {
            Half::Left
        } else {
            Half::Right
        }
    }

    pub fn weight_at(&self, pos: SlotPos) -> i32 {
        self.cells[pos.row][pos.col]
    }

    pub fn set_weight(&mut self, pos: SlotPos, value: i32) {
        self.cells[pos.row][pos.col] = value;
    }

    pub fn is_empty(&self, pos: SlotPos) -> bool {
        self.cells[pos.row][pos.col] == EMPTY_CELL
    }

    pub fn is_void(&self, pos: SlotPos) -> bool {
        self.cells[pos.row][pos.col] == VOID_CELL
    }

    pub fn row_cells(&self, row: usize) -> &[i32] {
        &self.cells[row]
    }

    /// A slot can receive an item iff it is empty and either sits in the last
    /// row or rests on a non-empty slot. Items never float; a void below
    /// counts as support.
    pub fn is_landable(&self, pos: SlotPos) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        pos.row == self.rows - 1 || self.cells[pos.row + 1][pos.col] != EMPTY_CELL
    }

    /// Full pass over the grid; voids are skipped, everything else is added
    /// to the total and to the half its column belongs to.
    pub fn recompute_sums(&mut self) {
        self.left_sum = 0;
        self.right_sum = 0;
        self.total_sum = 0;

        for row in &self.cells {
            for (c, &value) in row.iter().enumerate() {
                if value == VOID_CELL {
                    continue;
                }
                self.total_sum += value;
                if c < self.cols / 2 {
                    self.left_sum += value;
                } else {
                    self.right_sum += value;
                }
            }
        }
    }

    pub fn left_sum(&self) -> i32 {
        self.left_sum
    }

    pub fn right_sum(&self) -> i32 {
        self.right_sum
    }

    pub fn total_sum(&self) -> i32 {
        self.total_sum
    }

    /// Tolerance check: recomputes the sums, then reports whether the halves
    /// are within 10% of the total of each other. An empty hold is balanced.
    pub fn is_balanced(&mut self) -> bool {
        self.recompute_sums();

        if self.total_sum == 0 {
            return true;
        }

        let tolerance = self.total_sum / TOLERANCE_DIVISOR;
        (self.left_sum - self.right_sum).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: Vec<Vec<i32>>) -> HoldGrid {
        HoldGrid::new(cells).unwrap()
    }

    #[test]
    fn sums_skip_void_cells() {
        let mut g = grid(vec![vec![-1, 0, 0, -1], vec![5, 0, 0, 7]]);
        g.recompute_sums();
        assert_eq!(g.left_sum(), 5);
        assert_eq!(g.right_sum(), 7);
        assert_eq!(g.total_sum(), 12);
    }

    #[test]
    fn rejects_ragged_matrix() {
        let err = HoldGrid::new(vec![vec![0, 0], vec![0]]).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidGrid(_)));
    }

    #[test]
    fn rejects_values_below_sentinel() {
        let err = HoldGrid::new(vec![vec![0, -2]]).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidGrid(_)));
    }

    #[test]
    fn empty_hold_is_balanced() {
        let mut g = grid(vec![vec![0, 0], vec![0, 0]]);
        assert!(g.is_balanced());
    }

    #[test]
    fn tolerance_is_ten_percent_of_total() {
        // total 100, tolerance 10: a 55/45 split passes, 56/44 does not
        let mut g = grid(vec![vec![55, 45]]);
        assert!(g.is_balanced());
        let mut g = grid(vec![vec![56, 44]]);
        assert!(!g.is_balanced());
    }

    #[test]
    fn balance_check_is_idempotent() {
        let mut g = grid(vec![vec![20, 0, 0, 0]]);
        assert_eq!(g.is_balanced(), g.is_balanced());
    }

    #[test]
    fn landable_requires_support() {
        let g = grid(vec![vec![0, 0, 0], vec![0, 4, -1]]);
        // last row is always supported
        assert!(g.is_landable(SlotPos::new(1, 0)));
        // resting on an item
        assert!(g.is_landable(SlotPos::new(0, 1)));
        // a void below counts as support
        assert!(g.is_landable(SlotPos::new(0, 2)));
        // floating
        assert!(!g.is_landable(SlotPos::new(0, 0)));
        // occupied slots are never landable
        assert!(!g.is_landable(SlotPos::new(1, 1)));
    }

    #[test]
    fn void_and_empty_are_distinct() {
        let g = grid(vec![vec![-1, 0, 3]]);
        assert!(g.is_void(SlotPos::new(0, 0)));
        assert!(!g.is_empty(SlotPos::new(0, 0)));
        assert!(g.is_empty(SlotPos::new(0, 1)));
        assert!(!g.is_void(SlotPos::new(0, 1)));
        assert!(!g.is_void(SlotPos::new(0, 2)));
    }

    #[test]
    fn half_split_is_consistent() {
        let g = grid(vec![vec![0, 0, 0, 0, 0]]);
        assert_eq!(g.half_col(), 2);
        assert_eq!(g.half_of(1), Half::Left);
        assert_eq!(g.half_of(2), Half::Right);
    }
}
