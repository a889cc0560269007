use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::snapshot::VersionSnapshot;
use crate::model::Task;

/// One field-level change on a task between two snapshots.
///
/// Variants are compared and emitted in a fixed priority order (name, start,
/// end, color, position, progress, milestone) so repeated diffs of the same
/// inputs are byte-identical.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    Name { old: String, new: String },
    Start { old: NaiveDateTime, new: NaiveDateTime },
    End { old: NaiveDateTime, new: NaiveDateTime },
    Color { old: String, new: String },
    Position { old: u32, new: u32 },
    Progress { old: Option<u8>, new: Option<u8> },
    Milestone { old: bool, new: bool },
}

impl TaskChange {
    /// Name of the changed field, for presentation.
    pub fn field(&self) -> &'static str {
        match self {
            TaskChange::Name { .. } => "name",
            TaskChange::Start { .. } => "startDate",
            TaskChange::End { .. } => "endDate",
            TaskChange::Color { .. } => "color",
            TaskChange::Position { .. } => "position",
            TaskChange::Progress { .. } => "progress",
            TaskChange::Milestone { .. } => "isMilestone",
        }
    }
}

/// A task present in both snapshots with at least one differing field.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedTask {
    pub task_id: Uuid,
    pub before: Task,
    pub after: Task,
    pub changes: Vec<TaskChange>,
}

/// Structural difference between two snapshots. Computed fresh per
/// comparison; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionDiff {
    pub added: Vec<Task>,
    pub removed: Vec<Task>,
    pub modified: Vec<ModifiedTask>,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Compare two snapshots by task id.
///
/// Output order is stable regardless of how the inputs were produced:
/// `added` and `modified` follow the newer snapshot's task order, `removed`
/// follows the older snapshot's.
pub fn diff_snapshots(older: &VersionSnapshot, newer: &VersionSnapshot) -> VersionDiff {
    let mut diff = VersionDiff::default();
    let old_map: HashMap<Uuid, &Task> = older.tasks.iter().map(|t| (t.id, t)).collect();
    let new_map: HashMap<Uuid, &Task> = newer.tasks.iter().map(|t| (t.id, t)).collect();

    for new_task in &newer.tasks {
        if let Some(old_task) = old_map.get(&new_task.id) {
            let changes = compare_tasks(old_task, new_task);
            if !changes.is_empty() {
                diff.modified.push(ModifiedTask {
                    task_id: new_task.id,
                    before: (*old_task).clone(),
                    after: new_task.clone(),
                    changes,
                });
            }
        } else {
            diff.added.push(new_task.clone());
        }
    }

    for old_task in &older.tasks {
        if !new_map.contains_key(&old_task.id) {
            diff.removed.push(old_task.clone());
        }
    }

    diff
}

fn compare_tasks(old: &Task, new: &Task) -> Vec<TaskChange> {
    let mut changes = Vec::new();

    if old.name != new.name {
        changes.push(TaskChange::Name {
            old: old.name.clone(),
            new: new.name.clone(),
        });
    }

    // Exact instant comparison: a same-day time change is a real change.
    if old.start != new.start {
        changes.push(TaskChange::Start {
            old: old.start,
            new: new.start,
        });
    }

    if old.end != new.end {
        changes.push(TaskChange::End {
            old: old.end,
            new: new.end,
        });
    }

    if old.color != new.color {
        changes.push(TaskChange::Color {
            old: old.color.clone(),
            new: new.color.clone(),
        });
    }

    if old.position != new.position {
        changes.push(TaskChange::Position {
            old: old.position,
            new: new.position,
        });
    }

    if old.progress != new.progress {
        changes.push(TaskChange::Progress {
            old: old.progress,
            new: new.progress,
        });
    }

    if old.is_milestone != new.is_milestone {
        changes.push(TaskChange::Milestone {
            old: old.is_milestone,
            new: new.is_milestone,
        });
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn snap(tasks: Vec<Task>) -> VersionSnapshot {
        VersionSnapshot::from_tasks("p".into(), tasks)
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let a = snap(vec![Task::new("x", at(2024, 6, 1), at(2024, 6, 5))]);
        let diff = diff_snapshots(&a, &a.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn progress_change_is_reported() {
        let mut before = Task::new("X", at(2024, 6, 1), at(2024, 6, 5));
        before.progress = Some(0);
        let mut after = before.clone();
        after.progress = Some(50);

        let diff = diff_snapshots(&snap(vec![before]), &snap(vec![after]));
        assert_eq!(diff.modified.len(), 1);
        let modified = &diff.modified[0];
        assert_eq!(
            modified.changes,
            vec![TaskChange::Progress {
                old: Some(0),
                new: Some(50)
            }]
        );
        assert_eq!(modified.changes[0].field(), "progress");
    }

    #[test]
    fn added_and_removed_partition_by_id() {
        let kept = Task::new("kept", at(2024, 6, 1), at(2024, 6, 5));
        let gone = Task::new("gone", at(2024, 6, 2), at(2024, 6, 6));
        let fresh = Task::new("fresh", at(2024, 6, 3), at(2024, 6, 7));

        let older = snap(vec![kept.clone(), gone.clone()]);
        let newer = snap(vec![kept, fresh.clone()]);

        let diff = diff_snapshots(&older, &newer);
        assert_eq!(diff.added, vec![fresh]);
        assert_eq!(diff.removed, vec![gone]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn same_id_never_lands_in_both_added_and_removed() {
        let mut task = Task::new("t", at(2024, 6, 1), at(2024, 6, 5));
        let older = snap(vec![task.clone()]);
        task.name = "renamed".into();
        let newer = snap(vec![task]);

        let diff = diff_snapshots(&older, &newer);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        assert_eq!(diff.modified.len(), 1);
    }

    #[test]
    fn changes_follow_fixed_field_priority() {
        let before = Task::new("old name", at(2024, 6, 1), at(2024, 6, 5));
        let mut after = before.clone();
        after.name = "new name".into();
        after.position = 3;
        after.start = at(2024, 6, 2);

        let diff = diff_snapshots(&snap(vec![before]), &snap(vec![after]));
        let fields: Vec<&str> = diff.modified[0].changes.iter().map(|c| c.field()).collect();
        assert_eq!(fields, vec!["name", "startDate", "position"]);
    }

    #[test]
    fn same_day_time_shift_counts_as_modified() {
        let before = Task::new("t", at(2024, 6, 1), at(2024, 6, 5));
        let mut after = before.clone();
        after.end += Duration::milliseconds(1);

        let diff = diff_snapshots(&snap(vec![before]), &snap(vec![after]));
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].changes[0].field(), "endDate");
    }

    #[test]
    fn output_order_tracks_snapshot_order_not_input_shuffle() {
        let a = Task::new("a", at(2024, 6, 1), at(2024, 6, 2));
        let b = Task::new("b", at(2024, 6, 1), at(2024, 6, 2));
        let c = Task::new("c", at(2024, 6, 1), at(2024, 6, 2));

        let older = snap(vec![a.clone(), b.clone(), c.clone()]);
        let mut b2 = b.clone();
        b2.name = "b2".into();
        let mut a2 = a.clone();
        a2.name = "a2".into();
        // Newer snapshot lists c, b, a.
        let newer = snap(vec![c, b2, a2]);

        let diff = diff_snapshots(&older, &newer);
        let ids: Vec<Uuid> = diff.modified.iter().map(|m| m.task_id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }
}
