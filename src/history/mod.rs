pub mod diff;
pub mod snapshot;

pub use diff::{diff_snapshots, ModifiedTask, TaskChange, VersionDiff};
pub use snapshot::{DateRange, SnapshotError, SnapshotMetadata, VersionSnapshot};
