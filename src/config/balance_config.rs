use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_MAX_ROUNDS;

/// Settings for one balancing run. The engine itself takes no tuning; these
/// control the outer loop and what gets reported along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub max_rounds: usize,
    pub print_grid_each_round: bool,
    pub export_round_history: bool,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            print_grid_each_round: true,
            export_round_history: false,
        }
    }
}
