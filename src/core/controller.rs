use tracing::{debug, info, warn};

use super::error::BalanceError;
use super::grid::{HoldGrid, SlotPos};
use super::obstacles::{self, ObstacleShift};
use super::pathfinder;
use crate::config::constants::{EMPTY_CELL, NEAR_BALANCE_THRESHOLD};
use crate::utils::logging::{self, OperationCategory};

/// Record of one executed relocation, for reporting and export.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub source: SlotPos,
    pub destination: SlotPos,
    pub weight: i32,
    /// Route taken, excluding the source slot and ending at the destination.
    pub route: Vec<SlotPos>,
    /// Sideways blocker shifts performed this round, both while evaluating
    /// candidates and while re-clearing the chosen source. These are
    /// committed placements in their own right.
    pub shifts: Vec<ObstacleShift>,
}

/// Outcome of one decision round.
#[derive(Debug, Clone)]
pub enum RoundOutcome {
    /// The halves were already within tolerance; nothing was moved.
    Balanced,
    /// One relocation was executed.
    Moved(MoveRecord),
    /// The chosen candidate was the previous move's destination; the latch
    /// is now set and the grid was not touched.
    Converged,
    /// No feasible candidate, the chosen route vanished, or the source could
    /// not be unblocked again; the pending move was not executed.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Balanced,
    Converged,
    Stalled,
    RoundLimit,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub status: RunStatus,
    pub rounds: usize,
    pub moves: Vec<MoveRecord>,
}

/// Orchestrates decision rounds over one hold.
///
/// Owns the grid for the lifetime of a balancing run, along with the one-way
/// convergence latch and the last-move memory used by the oscillation guard.
/// Neither is ever reset once a run starts.
pub struct BalanceController {
    grid: HoldGrid,
    optimal_balance_reached: bool,
    previous_destination: Option<SlotPos>,
}

impl BalanceController {
    pub fn new(grid: HoldGrid) -> Self {
        Self {
            grid,
            optimal_balance_reached: false,
            previous_destination: None,
        }
    }

    pub fn grid(&self) -> &HoldGrid {
        &self.grid
    }

    /// Once the convergence latch is set this always reports true; otherwise
    /// it is the grid's 10%-tolerance check.
    pub fn is_balanced(&mut self) -> bool {
        if self.optimal_balance_reached {
            return true;
        }
        self.grid.is_balanced()
    }

    /// Picks the item in the heavier half whose relocation brings the half
    /// sums closest to equal.
    ///
    /// Candidates are scanned rows ascending, then columns ascending. Each
    /// candidate is unblocked first (a relocation failure aborts the whole
    /// pass), then probed for reachability; unreachable candidates are
    /// skipped. A candidate landing within `NEAR_BALANCE_THRESHOLD` of the
    /// ideal half weight is taken immediately. Returns the best candidate
    /// and the blocker shifts performed, or `Err(NoFeasibleMove)` when every
    /// candidate is infeasible.
    pub fn find_best_move(&mut self) -> Result<(SlotPos, Vec<ObstacleShift>), BalanceError> {
        let _timing = logging::start_timing("find_best_move", OperationCategory::RoundDecision);

        self.grid.recompute_sums();
        let heavier_left = self.grid.left_sum() > self.grid.right_sum();
        let ideal = self.grid.total_sum() / 2;
        let (col_start, col_end) = if heavier_left {
            (0, self.grid.half_col())
        } else {
            (self.grid.half_col(), self.grid.cols())
        };

        let mut best: Option<SlotPos> = None;
        let mut closest_diff = i32::MAX;
        let mut shifts = Vec::new();

        for row in 0..self.grid.rows() {
            for col in col_start..col_end {
                let pos = SlotPos::new(row, col);
                if self.grid.is_empty(pos) || self.grid.is_void(pos) {
                    continue;
                }
                let weight = self.grid.weight_at(pos);

                shifts.extend(obstacles::clear_above(&mut self.grid, pos)?);

                match pathfinder::find_route(&self.grid, pos) {
                    Ok(_) => {}
                    Err(
                        BalanceError::TargetUnreachable { .. } | BalanceError::RouteNotFound { .. },
                    ) => {
                        debug!(%pos, "candidate unreachable, skipping");
                        continue;
                    }
                    Err(e) => return Err(e),
                }

                // shifts stay within the candidate's half, so the receiving
                // half's sum is still current
                let receiving = if heavier_left {
                    self.grid.right_sum()
                } else {
                    self.grid.left_sum()
                };
                let diff = (receiving + weight - ideal).abs();
                debug!(%pos, weight, diff, "scored candidate");

                if diff < closest_diff {
                    closest_diff = diff;
                    best = Some(pos);
                }
                if diff <= NEAR_BALANCE_THRESHOLD {
                    return Ok((pos, shifts));
                }
            }
        }

        match best {
            Some(pos) => Ok((pos, shifts)),
            None => Err(BalanceError::NoFeasibleMove),
        }
    }

    /// Runs one decision round, executing at most one relocation.
    pub fn run_round(&mut self) -> Result<RoundOutcome, BalanceError> {
        let _timing = logging::start_timing("run_round", OperationCategory::RoundDecision);

        if self.is_balanced() {
            return Ok(RoundOutcome::Balanced);
        }

        let (source, mut shifts) = match self.find_best_move() {
            Ok(pair) => pair,
            Err(BalanceError::NoFeasibleMove) => {
                warn!("no feasible move in the heavier half; run is stalled");
                return Ok(RoundOutcome::Stalled);
            }
            Err(e) => return Err(e),
        };

        // Oscillation guard: picking the slot the previous move landed on
        // would undo that move. Latch and stop instead.
        if self.previous_destination == Some(source) {
            info!(%source, "best move would reverse the previous one; optimal balance reached");
            self.optimal_balance_reached = true;
            return Ok(RoundOutcome::Converged);
        }

        // Scoring candidates after the chosen one can set a blocker down in
        // the source's column, right on top of it. Unblock the source again
        // before extracting.
        match obstacles::clear_above(&mut self.grid, source) {
            Ok(extra) => shifts.extend(extra),
            Err(e) => {
                warn!(%source, error = %e, "cannot unblock the chosen source; no move this round");
                return Ok(RoundOutcome::Stalled);
            }
        }

        let route = match pathfinder::find_route(&self.grid, source) {
            Ok(route) => route,
            Err(BalanceError::TargetUnreachable { .. } | BalanceError::RouteNotFound { .. }) => {
                warn!(%source, "route to the chosen target vanished; no move this round");
                return Ok(RoundOutcome::Stalled);
            }
            Err(e) => return Err(e),
        };
        let Some(&destination) = route.last() else {
            return Ok(RoundOutcome::Stalled);
        };

        let weight = self.grid.weight_at(source);
        self.grid.set_weight(destination, weight);
        self.grid.set_weight(source, EMPTY_CELL);
        self.previous_destination = Some(destination);
        self.grid.recompute_sums();

        info!(
            %source,
            %destination,
            weight,
            left = self.grid.left_sum(),
            right = self.grid.right_sum(),
            "executed move"
        );

        Ok(RoundOutcome::Moved(MoveRecord {
            source,
            destination,
            weight,
            route,
            shifts,
        }))
    }

    /// Drives rounds until the hold is balanced, the oscillation latch trips,
    /// the run stalls, or `max_rounds` is exhausted.
    pub fn run(&mut self, max_rounds: usize) -> Result<RunSummary, BalanceError> {
        let mut moves = Vec::new();

        for round in 0..max_rounds {
            match self.run_round()? {
                RoundOutcome::Balanced => {
                    return Ok(RunSummary {
                        status: RunStatus::Balanced,
                        rounds: round,
                        moves,
                    })
                }
                RoundOutcome::Converged => {
                    return Ok(RunSummary {
                        status: RunStatus::Converged,
                        rounds: round,
                        moves,
                    })
                }
                RoundOutcome::Stalled => {
                    return Ok(RunSummary {
                        status: RunStatus::Stalled,
                        rounds: round,
                        moves,
                    })
                }
                RoundOutcome::Moved(record) => moves.push(record),
            }
        }

        Ok(RunSummary {
            status: RunStatus::RoundLimit,
            rounds: max_rounds,
            moves,
        })
    }
}
