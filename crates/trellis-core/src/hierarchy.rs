//! Structural queries over a project's task collection.
//!
//! Every function here is pure: it reads a slice of tasks in collection order
//! and derives a value from the parent relation and sibling order alone.
//! Nothing is cached, so results never go stale.
//!
//! Parent walks are bounded by [`MAX_DEPTH`]. The lifecycle coordinator keeps
//! the parent relation acyclic, so the bound is only reached if a collection
//! was corrupted elsewhere; in that case the walk stops and logs an error
//! instead of spinning forever.

use std::collections::HashSet;

use log::error;

use crate::models::Task;

/// Upper bound on parent hops followed by any walk.
pub const MAX_DEPTH: usize = 1024;

/// Looks up a task by id.
pub fn find(task_id: u64, tasks: &[Task]) -> Option<&Task> {
    tasks.iter().find(|t| t.id == task_id)
}

/// 1-based position of `task` among the tasks sharing its parent.
fn sibling_position(task: &Task, tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.parent == task.parent)
        .position(|t| t.id == task.id)
        .map_or(0, |index| index + 1)
}

/// Dotted display number of a task, e.g. `"1.2.1"`.
///
/// Top-level tasks are numbered by their position among top-level tasks;
/// nested tasks append their position among siblings to their parent's
/// number. Returns an empty string for an unknown id.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use trellis_core::{hierarchy, lifecycle::TaskCoordinator, models::{NewTask, TaskKind}, store::MemoryStore};
///
/// let mut coordinator = TaskCoordinator::new(MemoryStore::new());
/// let (start, end) = (date(2024, 1, 1), date(2024, 1, 5));
/// let phase = coordinator.create(NewTask::new("Phase", start, end).with_kind(TaskKind::Group))?;
/// let first = coordinator.create(NewTask::new("First", start, end).with_parent(phase.id))?;
///
/// let tasks = coordinator.tasks()?;
/// assert_eq!(hierarchy::task_number(first.id, &tasks), "1.1");
/// assert_eq!(hierarchy::task_number(999, &tasks), "");
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
pub fn task_number(task_id: u64, tasks: &[Task]) -> String {
    number_at(task_id, tasks, 0)
}

fn number_at(task_id: u64, tasks: &[Task], hops: usize) -> String {
    if hops > MAX_DEPTH {
        error!("Parent chain of task {task_id} exceeds {MAX_DEPTH} levels; numbering aborted");
        return String::new();
    }
    let Some(task) = find(task_id, tasks) else {
        return String::new();
    };
    let position = sibling_position(task, tasks);
    match task.parent {
        None => position.to_string(),
        Some(parent) => format!("{}.{position}", number_at(parent, tasks, hops + 1)),
    }
}

/// Number of parent hops from `task` to the root; 0 for top-level tasks.
///
/// Every parent id counts as a hop; a parent id with no matching record ends
/// the walk after that hop.
pub fn depth(task: &Task, tasks: &[Task]) -> usize {
    let mut depth = 0;
    let mut current = task;
    while let Some(parent_id) = current.parent {
        depth += 1;
        if depth >= MAX_DEPTH {
            error!("Parent chain of task {} exceeds {MAX_DEPTH} levels", task.id);
            break;
        }
        let Some(parent) = find(parent_id, tasks) else {
            break;
        };
        current = parent;
    }
    depth
}

/// True iff any task names `task_id` as its parent.
pub fn has_children(task_id: u64, tasks: &[Task]) -> bool {
    tasks.iter().any(|t| t.parent == Some(task_id))
}

/// Direct children of `task_id`, in collection order.
pub fn children(task_id: u64, tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.parent == Some(task_id)).collect()
}

/// True iff following parent links upward from `task` reaches `ancestor_id`.
pub fn is_descendant_of(task: &Task, ancestor_id: u64, tasks: &[Task]) -> bool {
    let mut current = task;
    for _ in 0..MAX_DEPTH {
        let Some(parent_id) = current.parent else {
            return false;
        };
        if parent_id == ancestor_id {
            return true;
        }
        let Some(parent) = find(parent_id, tasks) else {
            return false;
        };
        current = parent;
    }
    error!(
        "Parent chain of task {} exceeds {MAX_DEPTH} levels; treating as descendant of {ancestor_id}",
        task.id
    );
    true
}

/// Ids of every task below `task_id`, transitively, in collection order of
/// discovery (breadth first). The task itself is not included.
pub fn descendant_ids(task_id: u64, tasks: &[Task]) -> Vec<u64> {
    let mut found = Vec::new();
    let mut seen = HashSet::from([task_id]);
    let mut frontier = vec![task_id];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for task in tasks {
            let Some(parent) = task.parent else {
                continue;
            };
            if frontier.contains(&parent) && seen.insert(task.id) {
                found.push(task.id);
                next.push(task.id);
            }
        }
        frontier = next;
    }

    found
}

/// Collection index at which a new task with the given parent is inserted.
///
/// With a known parent the new task goes directly after the contiguous block
/// made of the parent and its existing descendants, keeping each subtree
/// contiguous. Without a parent, or when the parent is unknown, it is
/// appended.
pub fn insertion_index(parent: Option<u64>, tasks: &[Task]) -> usize {
    let Some(parent_id) = parent else {
        return tasks.len();
    };
    let Some(parent_index) = tasks.iter().position(|t| t.id == parent_id) else {
        return tasks.len();
    };

    let mut last = parent_index;
    for (index, task) in tasks.iter().enumerate().skip(parent_index + 1) {
        if is_descendant_of(task, parent_id, tasks) {
            last = index;
        } else {
            break;
        }
    }
    last + 1
}

/// A task annotated with its display number and nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub number: String,
    pub depth: usize,
    pub task: Task,
}

/// Every task in collection order, numbered and depth-annotated.
///
/// Because subtrees are kept contiguous on insertion, rendering the entries
/// in order with indentation by depth yields the tree.
pub fn outline(tasks: &[Task]) -> Vec<OutlineEntry> {
    tasks
        .iter()
        .map(|task| OutlineEntry {
            number: task_number(task.id, tasks),
            depth: depth(task, tasks),
            task: task.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{group, planning_phase, task};

    #[test]
    fn test_top_level_numbers_follow_collection_order() {
        let tasks = vec![task(5, None), group(2, None), task(9, None)];

        assert_eq!(task_number(5, &tasks), "1");
        assert_eq!(task_number(2, &tasks), "2");
        assert_eq!(task_number(9, &tasks), "3");
    }

    #[test]
    fn test_nested_numbers_extend_parent_number() {
        let tasks = planning_phase();

        assert_eq!(task_number(1, &tasks), "1");
        assert_eq!(task_number(11, &tasks), "1.1");
        assert_eq!(task_number(12, &tasks), "1.2");
        assert_eq!(task_number(121, &tasks), "1.2.1");
    }

    #[test]
    fn test_numbers_skip_other_parents_children() {
        let tasks = vec![
            group(1, None),
            task(11, Some(1)),
            group(2, None),
            task(21, Some(2)),
            task(12, Some(1)),
        ];

        assert_eq!(task_number(12, &tasks), "1.2");
        assert_eq!(task_number(21, &tasks), "2.1");
    }

    #[test]
    fn test_unknown_id_has_empty_number() {
        assert_eq!(task_number(42, &planning_phase()), "");
    }

    #[test]
    fn test_depth() {
        let tasks = planning_phase();

        assert_eq!(depth(&tasks[0], &tasks), 0);
        assert_eq!(depth(&tasks[1], &tasks), 1);
        assert_eq!(depth(&tasks[3], &tasks), 2);
    }

    #[test]
    fn test_depth_counts_hop_to_missing_parent() {
        let orphan = task(7, Some(999));
        assert_eq!(depth(&orphan, &[orphan.clone()]), 1);

        let tasks = vec![group(1, Some(999)), task(11, Some(1))];
        assert_eq!(depth(&tasks[1], &tasks), 2);
    }

    #[test]
    fn test_depth_terminates_on_corrupted_cycle() {
        let tasks = vec![group(1, Some(2)), group(2, Some(1))];
        assert_eq!(depth(&tasks[0], &tasks), MAX_DEPTH);
    }

    #[test]
    fn test_children_and_has_children() {
        let tasks = planning_phase();

        let ids: Vec<u64> = children(1, &tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert!(has_children(12, &tasks));
        assert!(!has_children(11, &tasks));
        assert!(children(11, &tasks).is_empty());
    }

    #[test]
    fn test_is_descendant_of_is_transitive() {
        let tasks = planning_phase();
        let leaf = &tasks[3];

        assert!(is_descendant_of(leaf, 12, &tasks));
        assert!(is_descendant_of(leaf, 1, &tasks));
        assert!(!is_descendant_of(leaf, 11, &tasks));
        assert!(!is_descendant_of(&tasks[0], 121, &tasks));
    }

    #[test]
    fn test_is_descendant_of_terminates_on_corrupted_cycle() {
        let tasks = vec![group(1, Some(2)), group(2, Some(1))];
        assert!(is_descendant_of(&tasks[0], 3, &tasks));
    }

    #[test]
    fn test_descendant_ids_collects_whole_subtree() {
        let mut tasks = planning_phase();
        tasks.push(task(2, None));

        let mut ids = descendant_ids(1, &tasks);
        ids.sort_unstable();
        assert_eq!(ids, vec![11, 12, 121]);
        assert!(descendant_ids(2, &tasks).is_empty());
        assert!(descendant_ids(404, &tasks).is_empty());
    }

    #[test]
    fn test_insertion_index_after_last_descendant() {
        let mut tasks = planning_phase();
        tasks.push(task(2, None));

        assert_eq!(insertion_index(Some(1), &tasks), 4);
        assert_eq!(insertion_index(Some(12), &tasks), 4);
    }

    #[test]
    fn test_insertion_index_directly_after_childless_parent() {
        let tasks = vec![group(1, None), group(2, None), task(3, None)];
        assert_eq!(insertion_index(Some(2), &tasks), 2);
    }

    #[test]
    fn test_insertion_index_appends_without_known_parent() {
        let tasks = planning_phase();

        assert_eq!(insertion_index(None, &tasks), 4);
        assert_eq!(insertion_index(Some(404), &tasks), 4);
    }

    #[test]
    fn test_outline_numbers_every_task() {
        let entries = outline(&planning_phase());
        let rows: Vec<(&str, usize)> = entries.iter().map(|e| (e.number.as_str(), e.depth)).collect();
        assert_eq!(rows, vec![("1", 0), ("1.1", 1), ("1.2", 1), ("1.2.1", 2)]);
    }
}
