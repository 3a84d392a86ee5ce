use clap::Parser;

use crate::config::constants::DEFAULT_MAX_ROUNDS;

#[derive(Parser)]
#[command(author, version, about = "Hold weight balancing engine", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Hold layout file (.csv or .json)")]
    grid: Option<String>,

    #[arg(long, help = "Random seed for the demo grid when no layout file is given")]
    seed: Option<u64>,

    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, help = "Write a per-round CSV history after the run", default_value_t = false)]
    export_history: bool,

    #[arg(short = 'o', long, default_value = "exports")]
    export_dir: String,

    #[arg(short, long, help = "Suppress per-round grid printing", default_value_t = false)]
    quiet: bool,
}

// Getter methods for all fields
impl Args {
    pub fn grid(&self) -> Option<&str> {
        self.grid.as_deref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn export_history(&self) -> bool {
        self.export_history
    }

    pub fn export_dir(&self) -> &str {
        &self.export_dir
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}
