// Module declarations for the hold balancing engine

// Core decision-and-search engine
pub mod core {
    pub mod controller;
    pub mod error;
    pub mod grid;
    pub mod obstacles;
    pub mod pathfinder;
}

// Configuration modules
pub mod config {
    pub mod balance_config;
    pub mod constants;
}

// Data loaders
pub mod data {
    pub mod grid_loader;
}

// Display of grids, weights and routes
pub mod analysis {
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod csv_export;
    pub mod logging;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::controller::{BalanceController, MoveRecord, RoundOutcome, RunStatus, RunSummary};
pub use crate::core::error::BalanceError;
pub use crate::core::grid::{Half, HoldGrid, SlotPos};
pub use crate::core::obstacles::ObstacleShift;
