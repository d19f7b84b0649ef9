//! Fixture builders shared by unit tests.

use jiff::civil::date;

use crate::models::{Priority, Task, TaskKind, TaskLink, TaskStatus};

/// Plain task with fixed dates and no cost.
pub(crate) fn task(id: u64, parent: Option<u64>) -> Task {
    Task {
        id,
        parent,
        kind: TaskKind::Task,
        text: format!("Task {id}"),
        description: None,
        start: date(2024, 1, 15),
        end: date(2024, 1, 31),
        percent: 0.0,
        status: TaskStatus::Pending,
        priority: Priority::Medium,
        assignee: None,
        cost: None,
        links: Vec::new(),
    }
}

pub(crate) fn group(id: u64, parent: Option<u64>) -> Task {
    Task {
        kind: TaskKind::Group,
        ..task(id, parent)
    }
}

pub(crate) fn milestone(id: u64, parent: Option<u64>) -> Task {
    Task {
        kind: TaskKind::Milestone,
        cost: Some(0.0),
        ..task(id, parent)
    }
}

pub(crate) fn costed(id: u64, parent: Option<u64>, cost: f64) -> Task {
    Task {
        cost: Some(cost),
        ..task(id, parent)
    }
}

pub(crate) fn linked(mut task: Task, links: Vec<TaskLink>) -> Task {
    task.links = links;
    task
}

/// The planning-phase scenario:
///
/// ```text
/// 1    group
/// 11   ├── task (75)
/// 12   └── group
/// 121      └── task (120)
/// ```
pub(crate) fn planning_phase() -> Vec<Task> {
    vec![
        group(1, None),
        costed(11, Some(1), 75.0),
        group(12, Some(1)),
        costed(121, Some(12), 120.0),
    ]
}
