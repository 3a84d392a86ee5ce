use thiserror::Error;

/// Error kinds produced by the balancing engine.
///
/// All of these are recoverable at the round level: the grid is never left
/// partially mutated by a failed round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// No landable slot exists in the opposite half for an item in `start_col`.
    #[error("no landable slot in the opposite half for an item in column {start_col}")]
    TargetUnreachable { start_col: usize },

    /// The route search exhausted its frontier without reaching the target.
    #[error("no route from ({row}, {col}) to the selected landing slot")]
    RouteNotFound { row: usize, col: usize },

    /// The destination column for a blocker shift has no empty slot.
    #[error("cannot relocate blocker at ({row}, {col}): column {dest_col} is full")]
    ObstacleRelocationFailed {
        row: usize,
        col: usize,
        dest_col: usize,
    },

    /// Every candidate in the heavier half was infeasible.
    #[error("no feasible move in the heavier half")]
    NoFeasibleMove,

    /// The supplied matrix is not a usable grid.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}
