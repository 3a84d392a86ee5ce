use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::info;

use crate::core::controller::MoveRecord;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes one row per executed move to a timestamped CSV file in `dir`,
/// creating the directory if needed. Returns the path written.
pub fn export_round_history(moves: &[MoveRecord], dir: &str) -> Result<PathBuf, ExportError> {
    let _timing = logging::start_timing(
        "export_round_history",
        OperationCategory::FileIO {
            subcategory: FileIOType::HistoryExport,
        },
    );

    if !Path::new(dir).exists() {
        fs::create_dir_all(dir)?;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = Path::new(dir).join(format!("balance_rounds_{}.csv", timestamp));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record([
        "round",
        "source_row",
        "source_col",
        "dest_row",
        "dest_col",
        "weight",
        "route_steps",
        "blocker_shifts",
    ])?;

    for (round, record) in moves.iter().enumerate() {
        writer.write_record([
            (round + 1).to_string(),
            record.source.row.to_string(),
            record.source.col.to_string(),
            record.destination.row.to_string(),
            record.destination.col.to_string(),
            record.weight.to_string(),
            record.route.len().to_string(),
            record.shifts.len().to_string(),
        ])?;
    }

    writer.flush()?;

    info!(path = %path.display(), moves = moves.len(), "exported round history");
    Ok(path)
}
