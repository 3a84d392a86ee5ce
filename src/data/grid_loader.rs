use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

use crate::config::constants::{
    DEMO_MAX_STACK_RATIO, DEMO_MAX_WEIGHT, DEMO_MIN_WEIGHT, EMPTY_CELL,
};
use crate::core::error::BalanceError;
use crate::core::grid::HoldGrid;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Error)]
pub enum GridLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid cell value: {0}")]
    InvalidCell(String),

    #[error("unsupported grid file format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Grid(#[from] BalanceError),
}

/// Loads the initial hold matrix from a layout file, dispatching on the
/// extension: `.json` for a nested integer array, `.csv`/`.txt` for one row
/// of comma-separated cells per line.
pub fn load_grid(path: &str) -> Result<HoldGrid, GridLoadError> {
    let _timing = logging::start_timing(
        "load_grid",
        OperationCategory::FileIO {
            subcategory: FileIOType::GridLoad,
        },
    );

    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let grid = match extension.as_str() {
        "json" => load_json(path)?,
        "csv" | "txt" => load_csv(path)?,
        other => return Err(GridLoadError::UnsupportedFormat(other.to_string())),
    };

    info!(
        path,
        rows = grid.rows(),
        cols = grid.cols(),
        total = grid.total_sum(),
        "loaded hold layout"
    );
    Ok(grid)
}

fn load_json(path: &str) -> Result<HoldGrid, GridLoadError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let cells: Vec<Vec<i32>> = serde_json::from_str(&contents)?;
    Ok(HoldGrid::new(cells)?)
}

fn load_csv(path: &str) -> Result<HoldGrid, GridLoadError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut cells = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value: i32 = field.parse().map_err(|_| {
                GridLoadError::InvalidCell(format!("'{}' is not an integer", field))
            })?;
            row.push(value);
        }
        cells.push(row);
    }

    Ok(HoldGrid::new(cells)?)
}

/// Builds a deterministic demo grid: each column gets a random stack of
/// items resting on the floor, so the support invariant holds from the
/// start. Used when no layout file is supplied.
pub fn random_grid(rows: usize, cols: usize, seed: u64) -> Result<HoldGrid, BalanceError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cells = vec![vec![EMPTY_CELL; cols]; rows];

    let max_stack = ((rows as f64) * DEMO_MAX_STACK_RATIO).ceil() as usize;
    for col in 0..cols {
        let stack = rng.gen_range(0..=max_stack);
        for level in 0..stack {
            cells[rows - 1 - level][col] = rng.gen_range(DEMO_MIN_WEIGHT..=DEMO_MAX_WEIGHT);
        }
    }

    HoldGrid::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::SlotPos;

    #[test]
    fn random_grid_respects_support() {
        let g = random_grid(8, 12, 42).unwrap();
        for row in 0..g.rows() - 1 {
            for col in 0..g.cols() {
                if g.weight_at(SlotPos::new(row, col)) > 0 {
                    assert!(g.weight_at(SlotPos::new(row + 1, col)) > 0);
                }
            }
        }
    }

    #[test]
    fn random_grid_is_deterministic_for_a_seed() {
        let a = random_grid(6, 8, 7).unwrap();
        let b = random_grid(6, 8, 7).unwrap();
        for row in 0..a.rows() {
            assert_eq!(a.row_cells(row), b.row_cells(row));
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_grid("layout.yaml").unwrap_err();
        assert!(matches!(err, GridLoadError::UnsupportedFormat(_)));
    }
}
