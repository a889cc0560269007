use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::CsvError;
use crate::model::{Task, TASK_PALETTE};

/// Parse a percent-complete cell: "50", "50%", or a status word.
fn parse_progress(s: &str) -> Option<u8> {
    let s = s.trim().trim_end_matches('%');
    if let Ok(n) = s.parse::<u8>() {
        return Some(n.min(100));
    }
    match s.to_lowercase().as_str() {
        "finished" | "done" | "complete" | "completed" => Some(100),
        "in progress" | "in-progress" | "active" | "started" => Some(50),
        "not started" | "not-started" | "new" => Some(0),
        _ => None,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Column {
    Name,
    Start,
    End,
    Progress,
    Milestone,
}

/// Map a header to a canonical column, matching flexibly on common spellings.
fn header_to_col(h: &str) -> Option<Column> {
    let normalized = h.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "name" | "task" | "tasklabel" | "taskname" | "label" | "title" => Some(Column::Name),
        "start" | "startdate" | "from" | "begin" | "begindate" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => {
            Some(Column::End)
        }
        "progress" | "status" | "state" | "percent" | "percentcomplete" => Some(Column::Progress),
        "milestone" | "ismilestone" | "type" => Some(Column::Milestone),
        _ => None,
    }
}

/// Import tasks from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly (e.g. "Task Label", "Start Date"). Rows with a missing name, an
/// unparseable date, or an inverted date range are skipped and counted.
/// Returns `(tasks, skipped_count)`.
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize), CsvError> {
    // Read the whole file to detect the delimiter from the first line.
    let content = std::fs::read_to_string(path)?;
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers.iter().map(header_to_col).collect();

    let has = |c: Column| col_map.iter().any(|m| *m == Some(c));
    if !has(Column::Name) || !has(Column::Start) || !has(Column::End) {
        return Err(CsvError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let cell = |c: Column| -> Option<&str> {
            record
                .iter()
                .zip(&col_map)
                .find(|(_, m)| **m == Some(c))
                .map(|(field, _)| field.trim())
        };

        let name = match cell(Column::Name) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let Some(start) = cell(Column::Start).and_then(parse_date) else {
            eprintln!("Skipping row {}: invalid start date", i + 2);
            skipped += 1;
            continue;
        };
        let Some(end) = cell(Column::End).and_then(parse_date) else {
            eprintln!("Skipping row {}: invalid end date", i + 2);
            skipped += 1;
            continue;
        };

        // Explicit milestone column wins; otherwise infer from start == end.
        let is_milestone = cell(Column::Milestone)
            .map(|s| {
                matches!(
                    s.to_lowercase().as_str(),
                    "true" | "yes" | "1" | "milestone"
                )
            })
            .unwrap_or(false)
            || start == end;

        if !is_milestone && end < start {
            eprintln!("Skipping row {}: end date before start date", i + 2);
            skipped += 1;
            continue;
        }

        let mut task = if is_milestone {
            Task::new_milestone(name, start)
        } else {
            Task::new(name, start, end)
        };
        task.progress = cell(Column::Progress).and_then(parse_progress);
        task.position = tasks.len() as u32;
        if !task.is_milestone {
            task.color = TASK_PALETTE[tasks.len() % TASK_PALETTE.len()].to_string();
        }
        tasks.push(task);
    }

    if tasks.is_empty() {
        return Err(CsvError::NoRows { skipped });
    }

    Ok((tasks, skipped))
}
