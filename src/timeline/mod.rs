pub mod coords;
pub mod drag;
pub mod grid;
pub mod period;

pub use coords::{bar_placement, date_to_pixel, pixel_to_date, snap_to_grid, BarPlacement};
pub use drag::{DateUpdate, DragState, DragType};
pub use grid::{build_grid, build_grid_on, visible_range, GridMetrics, TimelineColumn};
pub use period::{add_periods, end_of_period, periods_between, start_of_period, TimeScale};
