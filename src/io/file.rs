use std::path::Path;

use crate::history::{SnapshotError, VersionSnapshot};

/// Save a snapshot to a JSON file in the current stored schema.
pub fn save_snapshot(snapshot: &VersionSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let json = snapshot.to_json()?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a snapshot from a JSON file, migrating older schema versions.
pub fn load_snapshot(path: &Path) -> Result<VersionSnapshot, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    VersionSnapshot::from_json(&json)
}
