use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Project, Task};

/// Earliest start and latest end across a snapshot's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub total_tasks: usize,
    /// `None` for a snapshot with no tasks.
    pub date_range: Option<DateRange>,
}

/// An immutable saved copy of a project's task set at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    pub project_name: String,
    pub tasks: Vec<Task>,
    pub metadata: SnapshotMetadata,
}

/// Errors decoding a stored snapshot payload.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk form of a snapshot. Payloads carry an explicit `schema_version`
/// tag so old saves keep loading as the shape evolves; an untyped blob would
/// leave nothing to migrate from.
#[derive(Serialize, Deserialize)]
#[serde(tag = "schema_version")]
enum StoredSnapshot {
    /// Original shape: tasks only, no precomputed metadata.
    #[serde(rename = "1")]
    V1 {
        project_name: String,
        tasks: Vec<Task>,
    },
    #[serde(rename = "2")]
    V2 {
        project_name: String,
        tasks: Vec<Task>,
        metadata: SnapshotMetadata,
    },
}

impl VersionSnapshot {
    /// Capture the current state of a project as a save point.
    pub fn capture(project: &Project) -> Self {
        Self::from_tasks(project.name.clone(), project.tasks.clone())
    }

    pub fn from_tasks(project_name: String, tasks: Vec<Task>) -> Self {
        let metadata = compute_metadata(&tasks);
        Self {
            project_name,
            tasks,
            metadata,
        }
    }

    /// Serialize to the current stored schema.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let stored = StoredSnapshot::V2 {
            project_name: self.project_name.clone(),
            tasks: self.tasks.clone(),
            metadata: self.metadata.clone(),
        };
        Ok(serde_json::to_string_pretty(&stored)?)
    }

    /// Decode a stored payload, migrating older schema versions forward.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let stored: StoredSnapshot = serde_json::from_str(json)?;
        Ok(match stored {
            StoredSnapshot::V1 {
                project_name,
                tasks,
            } => {
                // V1 predates stored metadata; recompute it.
                Self::from_tasks(project_name, tasks)
            }
            StoredSnapshot::V2 {
                project_name,
                tasks,
                metadata,
            } => Self {
                project_name,
                tasks,
                metadata,
            },
        })
    }
}

fn compute_metadata(tasks: &[Task]) -> SnapshotMetadata {
    let start = tasks.iter().map(|t| t.start).min();
    let end = tasks.iter().map(|t| t.end).max();
    SnapshotMetadata {
        total_tasks: tasks.len(),
        date_range: start.zip(end).map(|(start, end)| DateRange { start, end }),
    }
}
