use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tracing::{debug, trace};

use super::error::BalanceError;
use super::grid::{Half, HoldGrid, SlotPos};
use crate::config::constants::EMPTY_CELL;
use crate::utils::logging::{self, OperationCategory, PathSearchType};

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Ephemeral A* search node. Carries the coordinates visited after the start
/// cell so the route can be returned straight off the goal node.
#[derive(Debug, Clone)]
struct RouteNode {
    pos: SlotPos,
    g: i32,
    h: i32,
    path: Vec<SlotPos>,
}

impl RouteNode {
    fn f(&self) -> i32 {
        self.g + self.h
    }
}

impl PartialEq for RouteNode {
    fn eq(&self, other: &Self) -> bool {
        self.f() == other.f() && self.h == other.h && self.pos == other.pos
    }
}

impl Eq for RouteNode {}

impl Ord for RouteNode {
    // BinaryHeap is a max-heap, so the ordering is inverted: lowest f wins,
    // ties broken by lower h, then lower row, then lower column. The
    // tie-break keeps expansion order deterministic across runs.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.pos.row.cmp(&self.pos.row))
            .then_with(|| other.pos.col.cmp(&self.pos.col))
    }
}

impl PartialOrd for RouteNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: SlotPos, b: SlotPos) -> i32 {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    (dr + dc) as i32
}

/// Finds the landing slot for an item currently in `start_col`.
///
/// Columns of the opposite half are scanned outward from the midline
/// boundary; within each column rows are scanned bottom-up and the first
/// landable slot wins. The scan stops at the first column that yields one.
pub fn select_target(grid: &HoldGrid, start_col: usize) -> Result<SlotPos, BalanceError> {
    let _timing = logging::start_timing(
        "select_target",
        OperationCategory::PathSearch {
            subcategory: PathSearchType::TargetSelection,
        },
    );

    let columns: Vec<usize> = match grid.half_of(start_col) {
        // item on the left moves right: half_col, half_col + 1, ...
        Half::Left => (grid.half_col()..grid.cols()).collect(),
        // item on the right moves left: half_col - 1, half_col - 2, ...
        Half::Right => (0..grid.half_col()).rev().collect(),
    };

    for col in columns {
        for row in (0..grid.rows()).rev() {
            let pos = SlotPos::new(row, col);
            if grid.is_landable(pos) {
                trace!(row, col, "selected landing slot");
                return Ok(pos);
            }
        }
    }

    debug!(start_col, "no landable slot in the opposite half");
    Err(BalanceError::TargetUnreachable { start_col })
}

/// A* route search from `start` to the landing slot chosen by
/// [`select_target`].
///
/// The grid is treated as a 4-connected graph whose traversable cells are
/// exactly those holding `0`; each step costs 1 and the heuristic is the
/// Manhattan distance to the target, which is admissible here. The returned
/// route excludes the start cell and includes the goal, so it is non-empty
/// on success and its last element is the landing slot.
pub fn find_route(grid: &HoldGrid, start: SlotPos) -> Result<Vec<SlotPos>, BalanceError> {
    let _timing = logging::start_timing(
        "find_route",
        OperationCategory::PathSearch {
            subcategory: PathSearchType::RouteSearch,
        },
    );

    let target = select_target(grid, start.col)?;

    let mut open = BinaryHeap::new();
    let mut visited: HashSet<SlotPos> = HashSet::new();

    open.push(RouteNode {
        pos: start,
        g: 0,
        h: manhattan(start, target),
        path: Vec::new(),
    });

    while let Some(current) = open.pop() {
        if current.pos == target {
            trace!(
                from = %start,
                to = %target,
                steps = current.path.len(),
                "route found"
            );
            return Ok(current.path);
        }

        if !visited.insert(current.pos) {
            continue;
        }

        for (dr, dc) in DIRECTIONS {
            let row = current.pos.row as isize + dr;
            let col = current.pos.col as isize + dc;
            if row < 0 || row >= grid.rows() as isize || col < 0 || col >= grid.cols() as isize {
                continue;
            }

            let next = SlotPos::new(row as usize, col as usize);
            if visited.contains(&next) {
                continue;
            }
            // voids and loaded slots are both obstacles
            if grid.weight_at(next) != EMPTY_CELL {
                continue;
            }

            let mut path = current.path.clone();
            path.push(next);
            open.push(RouteNode {
                pos: next,
                g: current.g + 1,
                h: manhattan(next, target),
                path,
            });
        }
    }

    debug!(from = %start, to = %target, "frontier exhausted without reaching target");
    Err(BalanceError::RouteNotFound {
        row: start.row,
        col: start.col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: Vec<Vec<i32>>) -> HoldGrid {
        HoldGrid::new(cells).unwrap()
    }

    fn assert_unit_steps(start: SlotPos, route: &[SlotPos]) {
        let mut prev = start;
        for &pos in route {
            let dr = prev.row.abs_diff(pos.row);
            let dc = prev.col.abs_diff(pos.col);
            assert_eq!(dr + dc, 1, "non-unit step {} -> {}", prev, pos);
            prev = pos;
        }
    }

    #[test]
    fn target_scan_starts_at_the_boundary_column() {
        let g = grid(vec![vec![0, 0, 0, 0], vec![9, 0, 0, 0]]);
        // item in the left half: boundary column of the right half is 2
        assert_eq!(select_target(&g, 0).unwrap(), SlotPos::new(1, 2));
        // item in the right half: boundary column of the left half is 1
        assert_eq!(select_target(&g, 3).unwrap(), SlotPos::new(1, 1));
    }

    #[test]
    fn target_scan_moves_outward_when_boundary_is_full() {
        let g = grid(vec![vec![0, 0, 7, 0], vec![9, 0, 7, 0]]);
        // column 2 is full, so the scan continues away from the midline
        assert_eq!(select_target(&g, 0).unwrap(), SlotPos::new(1, 3));
    }

    #[test]
    fn target_prefers_bottom_row_slot() {
        let g = grid(vec![vec![0, 0, 0, 0], vec![0, 0, 3, 0]]);
        // (1, 2) is occupied; the landable slot in column 2 is on top of it
        assert_eq!(select_target(&g, 0).unwrap(), SlotPos::new(0, 2));
    }

    #[test]
    fn target_fails_when_opposite_half_is_full() {
        let g = grid(vec![vec![9, 0, 5, 5], vec![9, 0, 5, 5]]);
        assert_eq!(
            select_target(&g, 0),
            Err(BalanceError::TargetUnreachable { start_col: 0 })
        );
    }

    #[test]
    fn route_excludes_start_and_ends_at_target() {
        let g = grid(vec![vec![0, 0, 0, 0], vec![9, 0, 0, 0]]);
        let start = SlotPos::new(1, 0);
        let route = find_route(&g, start).unwrap();
        assert!(!route.is_empty());
        assert_ne!(route[0], start);
        assert_eq!(*route.last().unwrap(), SlotPos::new(1, 2));
        assert_unit_steps(start, &route);
        // every routed cell was empty before the move
        for &pos in &route {
            assert_eq!(g.weight_at(pos), 0);
        }
    }

    #[test]
    fn route_goes_around_obstacles() {
        let g = grid(vec![
            vec![0, 0, 0, 0],
            vec![0, 8, 0, 0],
            vec![9, 8, 0, 0],
        ]);
        let start = SlotPos::new(2, 0);
        let route = find_route(&g, start).unwrap();
        assert_unit_steps(start, &route);
        // the wall in column 1 forces the route over the top
        assert!(route.contains(&SlotPos::new(0, 1)));
        assert_eq!(*route.last().unwrap(), SlotPos::new(2, 2));
    }

    #[test]
    fn walled_in_item_reports_route_not_found() {
        let g = grid(vec![
            vec![0, 8, 0, 0],
            vec![9, 8, 0, 0],
        ]);
        assert_eq!(
            find_route(&g, SlotPos::new(1, 0)),
            Err(BalanceError::RouteNotFound { row: 1, col: 0 })
        );
    }

    #[test]
    fn voids_are_not_traversable() {
        let g = grid(vec![
            vec![0, -1, 0, 0],
            vec![9, -1, 0, 0],
        ]);
        assert_eq!(
            find_route(&g, SlotPos::new(1, 0)),
            Err(BalanceError::RouteNotFound { row: 1, col: 0 })
        );
    }
}
