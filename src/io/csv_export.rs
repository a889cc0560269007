use std::path::Path;

use super::CsvError;
use crate::model::Task;

/// Export tasks to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Task Label ; Start Date ; End Date ; Progress ; Milestone
/// Dates are formatted as DD/MM/YYYY.
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, CsvError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["Task Label", "Start Date", "End Date", "Progress", "Milestone"])?;

    for task in tasks {
        let progress = task.progress.map(|p| format!("{p}%")).unwrap_or_default();
        let milestone = if task.is_milestone { "yes" } else { "" };
        wtr.write_record([
            task.name.clone(),
            task.start.format("%d/%m/%Y").to_string(),
            task.end.format("%d/%m/%Y").to_string(),
            progress,
            milestone.to_string(),
        ])?;
    }

    wtr.flush().map_err(CsvError::Io)?;
    Ok(tasks.len())
}
