use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task or milestone on the chart.
///
/// Treated as an immutable value during any one computation; the surrounding
/// application owns mutation and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Display color for the task bar, as a `#RRGGBB` hex string.
    pub color: String,
    /// Display order. Ties are broken by insertion order.
    pub position: u32,
    /// Percent complete, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// If true, this is a milestone (zero-duration, start == end).
    #[serde(default)]
    pub is_milestone: bool,
}

/// Bar colors cycled through when tasks are created without an explicit color.
pub const TASK_PALETTE: [&str; 8] = [
    "#4682B4", // steel blue
    "#CD5C5C", // indian red
    "#2E8B57", // sea green
    "#9370DB", // medium purple
    "#D2691E", // chocolate
    "#20B2AA", // light sea green
    "#B8860B", // dark goldenrod
    "#708090", // slate gray
];

const MILESTONE_COLOR: &str = "#FFA500"; // orange

impl Task {
    /// Create a new task with sensible defaults.
    ///
    /// Panics if `end <= start`; a non-milestone task with an inverted or
    /// empty range is a caller bug, not a recoverable condition.
    pub fn new(name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(start < end, "task range must satisfy start < end");
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            color: TASK_PALETTE[0].to_string(),
            position: 0,
            progress: None,
            is_milestone: false,
        }
    }

    /// Create a new milestone (zero duration, start == end).
    pub fn new_milestone(name: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start: date,
            end: date,
            color: MILESTONE_COLOR.to_string(),
            position: 0,
            progress: None,
            is_milestone: true,
        }
    }

    /// Panics when the start/end pair violates the task contract. Called at
    /// the edges where tasks enter a computation.
    pub fn assert_well_formed(&self) {
        if self.is_milestone {
            assert!(
                self.start == self.end,
                "milestone '{}' must have start == end",
                self.name
            );
        } else {
            assert!(
                self.start < self.end,
                "task '{}' must have start < end",
                self.name
            );
        }
    }
}

/// Tasks in display order: ascending `position`, insertion order on ties.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // Stable sort keeps insertion order for equal positions.
    ordered.sort_by_key(|t| t.position);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_task_has_defaults() {
        let t = Task::new("Design", day(1), day(5));
        assert_eq!(t.color, "#4682B4");
        assert_eq!(t.progress, None);
        assert!(!t.is_milestone);
    }

    #[test]
    #[should_panic(expected = "start < end")]
    fn inverted_range_panics() {
        Task::new("bad", day(5), day(5));
    }

    #[test]
    fn milestone_is_zero_duration() {
        let m = Task::new_milestone("Launch", day(15));
        assert_eq!(m.start, m.end);
        assert!(m.is_milestone);
        m.assert_well_formed();
    }

    #[test]
    fn display_order_breaks_ties_by_insertion() {
        let mut a = Task::new("a", day(1), day(2));
        let mut b = Task::new("b", day(1), day(2));
        let mut c = Task::new("c", day(1), day(2));
        a.position = 2;
        b.position = 1;
        c.position = 1;
        let tasks = vec![a, b, c];
        let ordered = display_order(&tasks);
        assert_eq!(
            ordered.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["b", "c", "a"]
        );
    }
}
