use crate::core::controller::{MoveRecord, RunStatus};
use crate::core::grid::HoldGrid;

pub fn print_grid(grid: &HoldGrid) {
    println!("current hold:");
    for row in 0..grid.rows() {
        for value in grid.row_cells(row) {
            print!("{:>5} ", value);
        }
        println!();
    }
}

pub fn print_weight_summary(grid: &HoldGrid) {
    println!("weight on left half: {}", grid.left_sum());
    println!("weight on right half: {}", grid.right_sum());
    println!("total weight: {}", grid.total_sum());
}

pub fn print_move(round: usize, record: &MoveRecord) {
    println!(
        "\nRound {}: moving {} from {} to {}",
        round, record.weight, record.source, record.destination
    );
    for shift in &record.shifts {
        println!(
            "  cleared blocker: {} ({}) -> {}",
            shift.from, shift.weight, shift.to
        );
    }
    println!("  route:");
    for (i, pos) in record.route.iter().enumerate() {
        println!("  Step {}: {}", i + 1, pos);
    }
}

pub fn print_run_status(status: RunStatus, rounds: usize) {
    match status {
        RunStatus::Balanced => println!("\nHold balanced after {} round(s).", rounds),
        RunStatus::Converged => {
            println!("\nOptimal balance reached after {} round(s); further moves would oscillate.", rounds)
        }
        RunStatus::Stalled => {
            println!("\nRun stalled after {} round(s): no feasible move remains.", rounds)
        }
        RunStatus::RoundLimit => println!("\nRound limit reached after {} round(s).", rounds),
    }
}
