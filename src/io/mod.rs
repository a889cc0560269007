pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use csv_export::export_csv;
pub use csv_import::import_csv;
pub use file::{load_snapshot, save_snapshot};

use thiserror::Error;

/// Errors moving tasks through the CSV boundary.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(
        "CSV is missing required columns (found headers: {found:?}); \
         need columns for task name, start date, end date"
    )]
    MissingColumns { found: Vec<String> },
    #[error("CSV file has no usable task rows ({skipped} rows skipped)")]
    NoRows { skipped: usize },
}
