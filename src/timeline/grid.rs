use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::period::{add_periods, end_of_period, start_of_period, TimeScale};
use crate::model::Task;

/// One header column of the timeline. Built fresh on every grid build and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineColumn {
    /// Start of the period this column covers.
    pub date: NaiveDateTime,
    pub label: String,
    /// Whether the column *starts* on a Saturday or Sunday. Multi-day
    /// columns (sprint/month/quarter) start on weekdays and are never
    /// flagged.
    pub is_weekend: bool,
    /// Whether the column's period contains the calendar day the grid was
    /// built on.
    pub is_today: bool,
    pub width: f32,
}

/// Derived layout for one build of the timeline. Recomputed whenever the
/// scale, date range, or task set changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetrics {
    pub column_width: f32,
    pub columns: Vec<TimelineColumn>,
    pub total_width: f32,
    /// Period-aligned start of the first column, or the requested start for
    /// an empty grid.
    pub start: NaiveDateTime,
    /// Last instant covered by the grid, or the requested end for an empty
    /// grid.
    pub end: NaiveDateTime,
}

impl GridMetrics {
    fn empty(start: NaiveDateTime, end: NaiveDateTime, scale: TimeScale) -> Self {
        Self {
            column_width: scale.column_width(),
            columns: Vec::new(),
            total_width: 0.0,
            start,
            end,
        }
    }
}

/// Build the grid covering `[start, end]` at `scale`, using the local
/// calendar day for today-highlighting.
pub fn build_grid(start: NaiveDateTime, end: NaiveDateTime, scale: TimeScale) -> GridMetrics {
    build_grid_on(start, end, scale, chrono::Local::now().date_naive())
}

/// Like [`build_grid`] but with an explicit "today", so builds are
/// reproducible.
pub fn build_grid_on(
    start: NaiveDateTime,
    end: NaiveDateTime,
    scale: TimeScale,
    today: NaiveDate,
) -> GridMetrics {
    // A reversed range is a transient UI state, not an error.
    if start > end {
        return GridMetrics::empty(start, end, scale);
    }

    let column_width = scale.column_width();
    let limit = end_of_period(end, scale);
    let today_instant = today.and_time(NaiveTime::MIN);

    let mut columns = Vec::new();
    let mut cursor = start_of_period(start, scale);
    while cursor <= limit {
        let period_end = end_of_period(cursor, scale);
        columns.push(TimelineColumn {
            date: cursor,
            label: scale.label(cursor),
            is_weekend: cursor.date().weekday().num_days_from_monday() >= 5,
            is_today: cursor <= today_instant && today_instant <= period_end,
            width: column_width,
        });
        cursor = add_periods(cursor, 1, scale);
    }

    let grid_start = columns.first().map(|c| c.date).unwrap_or(start);
    GridMetrics {
        column_width,
        total_width: columns.len() as f32 * column_width,
        columns,
        start: grid_start,
        end: limit,
    }
}

const RANGE_PAD_BEFORE_DAYS: i64 = 7;
const RANGE_PAD_AFTER_DAYS: i64 = 14;

/// Date range to display when the tasks themselves define the visible window:
/// one week before the earliest start, two weeks after the latest end, so
/// boundary tasks never sit flush against the grid edge. `None` when there
/// are no tasks.
pub fn visible_range(tasks: &[Task]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let earliest = tasks.iter().map(|t| t.start).min()?;
    let latest = tasks.iter().map(|t| t.end).max()?;
    Some((
        earliest - Duration::days(RANGE_PAD_BEFORE_DAYS),
        latest + Duration::days(RANGE_PAD_AFTER_DAYS),
    ))
}
