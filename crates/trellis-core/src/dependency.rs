//! Restrictions on which tasks may become a parent or dependency target.
//!
//! A task may not be placed under itself or under any of its own
//! descendants, and may not depend on itself or on anything in its own
//! subtree. Moving a task must not make it a descendant of something that
//! already depends on it or on its subtree. The `eligible_*` functions list the legal choices for a picker;
//! the `check_*` functions enforce the same rules on a proposed write.
//!
//! A `None` candidate stands for a task that has not been created yet. It has
//! no subtree, so nothing is excluded on its behalf.

use crate::{
    error::{Relation, Result, TrellisError},
    hierarchy,
    models::{Task, TaskLink},
};

fn is_self_or_descendant(task: &Task, candidate: &Task, tasks: &[Task]) -> bool {
    task.id == candidate.id || hierarchy::is_descendant_of(task, candidate.id, tasks)
}

fn subtree_ids(task_id: u64, tasks: &[Task]) -> Vec<u64> {
    let mut ids = vec![task_id];
    ids.extend(hierarchy::descendant_ids(task_id, tasks));
    ids
}

/// First link held by `parent` or one of its ancestors that targets a task
/// in `moved`, as `(holder, target)`.
fn ancestor_link_into(parent: &Task, moved: &[u64], tasks: &[Task]) -> Option<(u64, u64)> {
    let mut current = Some(parent);
    for _ in 0..hierarchy::MAX_DEPTH {
        let task = current?;
        if let Some(link) = task.links.iter().find(|l| moved.contains(&l.target)) {
            return Some((task.id, link.target));
        }
        current = task.parent.and_then(|id| hierarchy::find(id, tasks));
    }
    None
}

/// Groups that `candidate` may be placed under, in collection order.
pub fn eligible_parents<'a>(candidate: Option<&Task>, tasks: &'a [Task]) -> Vec<&'a Task> {
    let moved = candidate.map(|c| subtree_ids(c.id, tasks));
    tasks
        .iter()
        .filter(|t| t.is_group())
        .filter(|t| candidate.map_or(true, |c| !is_self_or_descendant(t, c, tasks)))
        .filter(|t| {
            moved
                .as_deref()
                .map_or(true, |moved| ancestor_link_into(t, moved, tasks).is_none())
        })
        .collect()
}

/// Tasks that `candidate` may depend on, in collection order.
pub fn eligible_dependency_targets<'a>(candidate: Option<&Task>, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| candidate.map_or(true, |c| !is_self_or_descendant(t, c, tasks)))
        .collect()
}

/// Validates `parent_id` as the parent of `task_id` (`None` for a task being
/// created).
///
/// # Errors
///
/// * `TrellisError::Cycle` - The parent is the task itself or one of its
///   descendants (`Relation::Parent`), or the parent or one of its ancestors
///   depends on the task or its subtree (`Relation::Dependency`)
/// * `TrellisError::Validation` - The parent does not exist or is not a group
pub fn check_parent(task_id: Option<u64>, parent_id: u64, tasks: &[Task]) -> Result<()> {
    if task_id == Some(parent_id) {
        return Err(TrellisError::cycle(parent_id, parent_id, Relation::Parent));
    }
    let Some(parent) = hierarchy::find(parent_id, tasks) else {
        return Err(TrellisError::validation("parent")
            .with_reason(format!("Task {parent_id} does not exist")));
    };
    if let Some(id) = task_id {
        if hierarchy::is_descendant_of(parent, id, tasks) {
            return Err(TrellisError::cycle(id, parent_id, Relation::Parent));
        }
    }
    if !parent.is_group() {
        return Err(TrellisError::validation("parent").with_reason(format!(
            "Task {parent_id} is a {}; only groups can contain tasks",
            parent.kind.as_str()
        )));
    }
    if let Some(id) = task_id {
        let moved = subtree_ids(id, tasks);
        if let Some((holder, target)) = ancestor_link_into(parent, &moved, tasks) {
            return Err(TrellisError::cycle(holder, target, Relation::Dependency));
        }
    }
    Ok(())
}

/// Validates every link target of `task_id` (`None` for a task being
/// created).
///
/// # Errors
///
/// * `TrellisError::Cycle` - A target is the task itself or one of its
///   descendants
/// * `TrellisError::Validation` - A target does not exist
pub fn check_links(task_id: Option<u64>, links: &[TaskLink], tasks: &[Task]) -> Result<()> {
    for link in links {
        if task_id == Some(link.target) {
            return Err(TrellisError::cycle(link.target, link.target, Relation::Dependency));
        }
        let Some(target) = hierarchy::find(link.target, tasks) else {
            return Err(TrellisError::validation("links")
                .with_reason(format!("Link target {} does not exist", link.target)));
        };
        if let Some(id) = task_id {
            if hierarchy::is_descendant_of(target, id, tasks) {
                return Err(TrellisError::cycle(id, link.target, Relation::Dependency));
            }
        }
    }
    Ok(())
}
