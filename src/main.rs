use anyhow::{Context, Result};
use clap::Parser;

use holdgrid::analysis::reporting;
use holdgrid::cli::cli::Args;
use holdgrid::config::balance_config::BalanceConfig;
use holdgrid::config::constants::{DEFAULT_COLS, DEFAULT_ROWS};
use holdgrid::core::controller::{BalanceController, RoundOutcome, RunStatus};
use holdgrid::core::grid::HoldGrid;
use holdgrid::data::grid_loader;
use holdgrid::utils::{csv_export, logging};

// Seed for the demo grid when neither a layout file nor --seed is given
const DEMO_SEED: u64 = 42;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    println!("Hold Weight Balancing Simulator");
    println!(
        "Debug logging: {}, history export: {}",
        if args.debug_logging() { "enabled" } else { "disabled" },
        if args.export_history() { "enabled" } else { "disabled" }
    );

    let config = BalanceConfig {
        max_rounds: args.max_rounds(),
        print_grid_each_round: !args.quiet(),
        export_round_history: args.export_history(),
    };

    let grid = initialize_grid(&args)?;
    reporting::print_grid(&grid);
    reporting::print_weight_summary(&grid);

    let mut controller = BalanceController::new(grid);
    let mut moves = Vec::new();

    let status = loop {
        if moves.len() >= config.max_rounds {
            break RunStatus::RoundLimit;
        }
        match controller.run_round() {
            Ok(RoundOutcome::Balanced) => break RunStatus::Balanced,
            Ok(RoundOutcome::Converged) => break RunStatus::Converged,
            Ok(RoundOutcome::Stalled) => break RunStatus::Stalled,
            Ok(RoundOutcome::Moved(record)) => {
                reporting::print_move(moves.len() + 1, &record);
                if config.print_grid_each_round {
                    reporting::print_grid(controller.grid());
                }
                moves.push(record);
            }
            Err(e) => {
                eprintln!("Round {} failed: {}", moves.len() + 1, e);
                break RunStatus::Stalled;
            }
        }
    };

    reporting::print_run_status(status, moves.len());
    reporting::print_weight_summary(controller.grid());

    if config.export_round_history {
        let path = csv_export::export_round_history(&moves, args.export_dir())
            .context("exporting round history")?;
        println!("Round history written to {}", path.display());
    }

    logging::print_timing_report();

    Ok(())
}

// Load the layout file if one was given, falling back to a seeded demo grid
fn initialize_grid(args: &Args) -> Result<HoldGrid> {
    if let Some(path) = args.grid() {
        match grid_loader::load_grid(path) {
            Ok(grid) => return Ok(grid),
            Err(e) => {
                eprintln!(
                    "Failed to load hold layout from {}: {}. Using demo grid.",
                    path, e
                );
            }
        }
    }

    grid_loader::random_grid(
        DEFAULT_ROWS,
        DEFAULT_COLS,
        args.seed().unwrap_or(DEMO_SEED),
    )
    .context("building the demo grid")
}
