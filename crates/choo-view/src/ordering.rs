//! Display orderings and predicates over the task mirror.
//!
//! The mirror itself has no meaningful order; everything shown to the user
//! goes through these functions.

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use choo_services::Task;

/// Marker shown next to overdue tasks.
pub const OVERDUE_MARKER: &str = "(overdue)";

/// Split into (pinned, unpinned), keeping relative order within each half.
pub fn partition_by_pin(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| t.pin)
}

/// Stable ascending sort by due instant.
pub fn sort_by_due<T: Borrow<Task>>(mut tasks: Vec<T>) -> Vec<T> {
    tasks.sort_by(|a, b| a.borrow().due.cmp(&b.borrow().due));
    tasks
}

pub fn pinned_tasks(tasks: &[Task]) -> Vec<&Task> {
    sort_by_due(partition_by_pin(tasks).0)
}

pub fn non_pinned_tasks(tasks: &[Task]) -> Vec<&Task> {
    sort_by_due(partition_by_pin(tasks).1)
}

/// Number of tasks not yet done.
pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.done).count()
}

/// An open task whose due instant is strictly before `now`.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.done && task.due < now
}

pub fn overdue_marker(task: &Task, now: DateTime<Utc>) -> &'static str {
    if is_overdue(task, now) {
        OVERDUE_MARKER
    } else {
        ""
    }
}
