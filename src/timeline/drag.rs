use chrono::NaiveDateTime;
use uuid::Uuid;

use super::coords::snap_to_grid;
use super::period::{add_periods, TimeScale};
use crate::model::Task;

/// Which gesture a drag performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragType {
    Move,
    ResizeLeft,
    ResizeRight,
}

/// Committed date change produced when a drag ends on a new position.
#[derive(Debug, Clone, PartialEq)]
pub struct DateUpdate {
    pub task_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Live state of one drag gesture.
///
/// Created on pointer-down, advanced on pointer-move, consumed on pointer-up.
/// Dropping the state without calling [`DragState::commit`] cancels the
/// gesture; nothing was written back to the caller's model in the meantime.
///
/// Every move event recomputes absolute dates from the original anchors plus
/// the total pointer delta, so a dropped or reordered event stream still
/// converges on the same result.
#[derive(Debug, Clone)]
pub struct DragState {
    pub task_id: Uuid,
    pub drag_type: DragType,
    /// Pointer x at gesture start.
    start_x: f32,
    /// Live dates, updated on every accepted move.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Committed dates at gesture start; the anchors all deltas apply to.
    original_start: NaiveDateTime,
    original_end: NaiveDateTime,
}

impl DragState {
    /// Begin a gesture on pointer-down. Returns `None` for milestones and in
    /// read-only mode; no state is created and the gesture never starts.
    pub fn begin(task: &Task, drag_type: DragType, pointer_x: f32, read_only: bool) -> Option<Self> {
        if task.is_milestone || read_only {
            return None;
        }
        task.assert_well_formed();
        Some(Self {
            task_id: task.id,
            drag_type,
            start_x: pointer_x,
            start: task.start,
            end: task.end,
            original_start: task.start,
            original_end: task.end,
        })
    }

    /// Advance the gesture on pointer-move. Returns true when the live dates
    /// changed. Sub-column movement and rejected resizes leave the previous
    /// valid state in place.
    pub fn update(&mut self, pointer_x: f32, scale: TimeScale, column_width: f32) -> bool {
        let delta_x = pointer_x - self.start_x;
        let periods = (delta_x / column_width).round() as i64;

        let (new_start, new_end) = match self.drag_type {
            DragType::Move => (
                add_periods(self.original_start, periods, scale),
                add_periods(self.original_end, periods, scale),
            ),
            DragType::ResizeLeft => {
                let candidate = add_periods(self.original_start, periods, scale);
                // Never let start reach or cross end mid-drag.
                if candidate >= self.end {
                    return false;
                }
                (candidate, self.end)
            }
            DragType::ResizeRight => {
                let candidate = add_periods(self.original_end, periods, scale);
                if candidate <= self.start {
                    return false;
                }
                (self.start, candidate)
            }
        };

        if new_start == self.start && new_end == self.end {
            return false;
        }
        self.start = new_start;
        self.end = new_end;
        true
    }

    /// End the gesture on pointer-up: snap the live dates to period starts
    /// and emit an update only if the snapped result differs from the dates
    /// the task had when the gesture began.
    pub fn commit(self, scale: TimeScale) -> Option<DateUpdate> {
        let start = snap_to_grid(self.start, scale);
        let end = snap_to_grid(self.end, scale);
        if start == snap_to_grid(self.original_start, scale)
            && end == snap_to_grid(self.original_end, scale)
        {
            return None;
        }
        Some(DateUpdate {
            task_id: self.task_id,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample_task() -> Task {
        Task::new("move me", at(2024, 1, 5), at(2024, 1, 10))
    }

    #[test]
    fn move_shifts_both_dates_by_whole_columns() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::Move, 100.0, false).unwrap();
        assert!(drag.update(100.0 + 3.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.start, at(2024, 1, 8));
        assert_eq!(drag.end, at(2024, 1, 13));

        let update = drag.commit(TimeScale::Day).unwrap();
        assert_eq!(update.task_id, task.id);
        assert_eq!(update.start, at(2024, 1, 8));
        assert_eq!(update.end, at(2024, 1, 13));
    }

    #[test]
    fn sub_column_movement_is_a_no_op() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::Move, 100.0, false).unwrap();
        assert!(!drag.update(115.0, TimeScale::Day, 40.0));
        assert_eq!(drag.start, task.start);
        assert_eq!(drag.end, task.end);
        assert!(drag.commit(TimeScale::Day).is_none());
    }

    #[test]
    fn resize_left_rejects_crossing_end() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::ResizeLeft, 0.0, false).unwrap();

        // Dragging start four columns right lands on Jan 9, the last valid
        // start before the Jan 10 end.
        assert!(drag.update(4.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.start, at(2024, 1, 9));

        // Seven columns would put start past the end; rejected, previous
        // valid state kept.
        assert!(!drag.update(7.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.start, at(2024, 1, 9));
        assert_eq!(drag.end, at(2024, 1, 10));

        // Start == end is also rejected.
        assert!(!drag.update(5.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.start, at(2024, 1, 9));

        let update = drag.commit(TimeScale::Day).unwrap();
        assert_eq!(update.start, at(2024, 1, 9));
        assert_eq!(update.end, at(2024, 1, 10));
    }

    #[test]
    fn resize_right_rejects_crossing_start() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::ResizeRight, 0.0, false).unwrap();
        assert!(!drag.update(-5.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.end, at(2024, 1, 10));

        assert!(drag.update(-4.0 * 40.0, TimeScale::Day, 40.0));
        assert_eq!(drag.end, at(2024, 1, 6));
    }

    #[test]
    fn each_event_recomputes_from_anchors() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::Move, 0.0, false).unwrap();

        // An out-of-order stream still lands where the last event says.
        drag.update(200.0, TimeScale::Day, 40.0);
        drag.update(40.0, TimeScale::Day, 40.0);
        drag.update(80.0, TimeScale::Day, 40.0);
        assert_eq!(drag.start, at(2024, 1, 7));
        assert_eq!(drag.end, at(2024, 1, 12));
    }

    #[test]
    fn returning_to_origin_commits_nothing() {
        let task = sample_task();
        let mut drag = DragState::begin(&task, DragType::Move, 0.0, false).unwrap();
        drag.update(120.0, TimeScale::Day, 40.0);
        drag.update(0.0, TimeScale::Day, 40.0);
        assert!(drag.commit(TimeScale::Day).is_none());
    }

    #[test]
    fn milestone_and_read_only_reject_pointer_down() {
        let m = Task::new_milestone("ship", at(2024, 1, 5));
        assert!(DragState::begin(&m, DragType::Move, 0.0, false).is_none());

        let t = sample_task();
        assert!(DragState::begin(&t, DragType::Move, 0.0, true).is_none());
    }

    #[test]
    fn commit_snaps_unaligned_dates_to_period_start() {
        // A task entered mid-week, resized at week scale, snaps to Mondays.
        let task = Task::new("w", at(2024, 6, 12), at(2024, 6, 26));
        let mut drag = DragState::begin(&task, DragType::Move, 0.0, false).unwrap();
        drag.update(80.0, TimeScale::Week, 80.0);
        let update = drag.commit(TimeScale::Week).unwrap();
        assert_eq!(update.start, at(2024, 6, 17));
        assert_eq!(update.end, at(2024, 7, 1));
    }
}
