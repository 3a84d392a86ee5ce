use tracing::debug;

use super::error::BalanceError;
use super::grid::{Half, HoldGrid, SlotPos};
use crate::config::constants::EMPTY_CELL;
use crate::utils::logging::{self, OperationCategory};

/// One sideways relocation performed to unblock a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleShift {
    pub from: SlotPos,
    pub to: SlotPos,
    pub weight: i32,
}

/// Relocates every item stacked above `slot` so its contents can be
/// extracted. Blockers are shifted top-down; each shift is a complete,
/// support-respecting placement, so the grid is valid after every step.
pub fn clear_above(grid: &mut HoldGrid, slot: SlotPos) -> Result<Vec<ObstacleShift>, BalanceError> {
    let mut shifts = Vec::new();

    for row in 0..slot.row {
        let pos = SlotPos::new(row, slot.col);
        if grid.weight_at(pos) > 0 {
            shifts.push(shift_aside(grid, pos)?);
        }
    }

    Ok(shifts)
}

/// Destination column for a blocker shift: one column further from the
/// midline, staying in the same half. At the outer edge the destination
/// wraps to the half's innermost column (columns 6 and 5 in the 12-column
/// reference layout).
fn shift_column(grid: &HoldGrid, col: usize) -> usize {
    match grid.half_of(col) {
        Half::Right => {
            if col < grid.cols() - 1 {
                col + 1
            } else {
                grid.half_col()
            }
        }
        Half::Left => {
            if col > 0 {
                col - 1
            } else {
                grid.half_col() - 1
            }
        }
    }
}

/// Lifts the item at `from` and sets it down at the bottommost empty slot of
/// the neighboring column. This is a direct placement, not a routed move.
pub fn shift_aside(grid: &mut HoldGrid, from: SlotPos) -> Result<ObstacleShift, BalanceError> {
    let _timing = logging::start_timing("shift_aside", OperationCategory::ObstacleShift);

    let dest_col = shift_column(grid, from.col);

    for row in (0..grid.rows()).rev() {
        let to = SlotPos::new(row, dest_col);
        if grid.weight_at(to) == EMPTY_CELL {
            let weight = grid.weight_at(from);
            grid.set_weight(to, weight);
            grid.set_weight(from, EMPTY_CELL);
            debug!(%from, %to, weight, "shifted blocker aside");
            return Ok(ObstacleShift { from, to, weight });
        }
    }

    debug!(%from, dest_col, "destination column is full");
    Err(BalanceError::ObstacleRelocationFailed {
        row: from.row,
        col: from.col,
        dest_col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: Vec<Vec<i32>>) -> HoldGrid {
        HoldGrid::new(cells).unwrap()
    }

    #[test]
    fn left_half_blockers_shift_left() {
        let mut g = grid(vec![
            vec![0, 5, 0, 0],
            vec![0, 9, 0, 0],
        ]);
        let shift = shift_aside(&mut g, SlotPos::new(0, 1)).unwrap();
        assert_eq!(shift.to, SlotPos::new(1, 0));
        assert_eq!(g.weight_at(SlotPos::new(1, 0)), 5);
        assert_eq!(g.weight_at(SlotPos::new(0, 1)), 0);
    }

    #[test]
    fn right_half_blockers_shift_right() {
        let mut g = grid(vec![
            vec![0, 0, 5, 0],
            vec![0, 0, 9, 0],
        ]);
        let shift = shift_aside(&mut g, SlotPos::new(0, 2)).unwrap();
        assert_eq!(shift.to, SlotPos::new(1, 3));
    }

    #[test]
    fn edge_columns_wrap_to_the_inner_boundary() {
        // column 0 wraps to the last left-half column
        let mut g = grid(vec![
            vec![5, 0, 0, 0],
            vec![9, 0, 0, 0],
        ]);
        let shift = shift_aside(&mut g, SlotPos::new(0, 0)).unwrap();
        assert_eq!(shift.to, SlotPos::new(1, 1));

        // last column wraps to the first right-half column
        let mut g = grid(vec![
            vec![0, 0, 0, 5],
            vec![0, 0, 0, 9],
        ]);
        let shift = shift_aside(&mut g, SlotPos::new(0, 3)).unwrap();
        assert_eq!(shift.to, SlotPos::new(1, 2));
    }

    #[test]
    fn blocker_lands_on_the_bottommost_empty_slot() {
        let mut g = grid(vec![
            vec![0, 5, 0, 0],
            vec![0, 9, 0, 0],
            vec![3, 9, 0, 0],
        ]);
        let shift = shift_aside(&mut g, SlotPos::new(0, 1)).unwrap();
        // (2, 0) is occupied, so the item rests on top of it
        assert_eq!(shift.to, SlotPos::new(1, 0));
    }

    #[test]
    fn full_destination_column_fails() {
        let mut g = grid(vec![
            vec![7, 5, 0, 0],
            vec![7, 9, 0, 0],
        ]);
        assert_eq!(
            shift_aside(&mut g, SlotPos::new(0, 1)),
            Err(BalanceError::ObstacleRelocationFailed {
                row: 0,
                col: 1,
                dest_col: 0
            })
        );
    }

    #[test]
    fn clear_above_unblocks_the_slot() {
        let mut g = grid(vec![
            vec![0, 2, 0, 0],
            vec![0, 3, 0, 0],
            vec![0, 9, 0, 0],
        ]);
        let shifts = clear_above(&mut g, SlotPos::new(2, 1)).unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(g.weight_at(SlotPos::new(0, 1)), 0);
        assert_eq!(g.weight_at(SlotPos::new(1, 1)), 0);
        assert_eq!(g.weight_at(SlotPos::new(2, 1)), 9);
        // both blockers went into column 0, stacked bottom-up
        assert_eq!(g.weight_at(SlotPos::new(2, 0)), 2);
        assert_eq!(g.weight_at(SlotPos::new(1, 0)), 3);
    }

    #[test]
    fn clear_above_is_a_no_op_for_unblocked_slots() {
        let mut g = grid(vec![
            vec![0, 0, 0, 0],
            vec![0, 9, 0, 0],
        ]);
        let shifts = clear_above(&mut g, SlotPos::new(1, 1)).unwrap();
        assert!(shifts.is_empty());
    }
}
