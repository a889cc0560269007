//! Core engine for Gantt chart applications: a timeline grid that maps
//! calendar dates to pixel coordinates across five time scales, a pure
//! drag/resize state machine, and a version-diff engine over task snapshots.
//!
//! Everything here is synchronous, pure computation; rendering, persistence,
//! and event plumbing belong to the surrounding application.

pub mod history;
pub mod io;
pub mod model;
pub mod timeline;

pub use history::{diff_snapshots, ModifiedTask, TaskChange, VersionDiff, VersionSnapshot};
pub use model::{Project, Task};
pub use timeline::{
    bar_placement, build_grid, BarPlacement, DateUpdate, DragState, DragType, GridMetrics,
    TimeScale, TimelineColumn,
};
