use chrono::NaiveDateTime;

use super::period::{add_periods, periods_between, start_of_period, TimeScale};
use crate::model::Task;

/// Every task bar keeps at least this fraction of a column, so milestones
/// and sub-period tasks stay visible and clickable.
const MIN_BAR_COLUMNS: f32 = 0.5;

/// X offset in pixels of `date` from `grid_start`: whole periods between the
/// two, times the column width. Dates before the grid start map to negative
/// offsets.
pub fn date_to_pixel(
    date: NaiveDateTime,
    grid_start: NaiveDateTime,
    scale: TimeScale,
    column_width: f32,
) -> f32 {
    periods_between(grid_start, date, scale) as f32 * column_width
}

/// Inverse of [`date_to_pixel`] at column granularity: the start date of the
/// column containing `pixel`. Sub-column pixel positions floor to the column
/// boundary, since dates have no sub-period resolution in this model.
pub fn pixel_to_date(
    pixel: f32,
    grid_start: NaiveDateTime,
    scale: TimeScale,
    column_width: f32,
) -> NaiveDateTime {
    let periods = (pixel / column_width).floor() as i64;
    add_periods(grid_start, periods, scale)
}

/// Round a date down to the start of its containing period.
pub fn snap_to_grid(date: NaiveDateTime, scale: TimeScale) -> NaiveDateTime {
    start_of_period(date, scale)
}

/// Horizontal placement of one task bar within a built grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPlacement {
    pub left: f32,
    pub width: f32,
}

/// Compute the `{left, width}` pixel pair for a task bar.
pub fn bar_placement(
    task: &Task,
    grid_start: NaiveDateTime,
    scale: TimeScale,
    column_width: f32,
) -> BarPlacement {
    task.assert_well_formed();
    let left = date_to_pixel(task.start, grid_start, scale, column_width);
    let span = periods_between(task.start, task.end, scale) as f32;
    BarPlacement {
        left,
        width: (span * column_width).max(column_width * MIN_BAR_COLUMNS),
    }
}
