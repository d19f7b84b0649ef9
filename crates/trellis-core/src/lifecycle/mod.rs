//! Create, update and delete operations over a project's task collection.
//!
//! [`TaskCoordinator`] is the only writer of a [`TaskStore`]. Every operation
//! reads a snapshot, validates the requested change against it, and then
//! issues exactly one store mutation, so a failed validation never leaves a
//! partial write behind.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    cost,
    dependency,
    error::{Result, TrellisError},
    hierarchy::{self, OutlineEntry},
    models::{NewTask, Task, TaskChanges, TaskKind, TaskStatus},
    store::TaskStore,
};


/// Status a task ends up with after a change.
///
/// An explicit status replaces the current one as the base. When the change
/// carries a percent, the percent decides: full completion means completed,
/// any progress means in progress, and dropping back to zero reopens a
/// completed task. Without a percent the base is returned untouched.
///
/// ```rust
/// use trellis_core::{lifecycle::resolve_status, models::TaskStatus};
///
/// assert_eq!(
///     resolve_status(TaskStatus::Pending, Some(1.0), None),
///     TaskStatus::Completed
/// );
/// assert_eq!(
///     resolve_status(TaskStatus::Pending, Some(0.4), Some(TaskStatus::Blocked)),
///     TaskStatus::InProgress
/// );
/// assert_eq!(
///     resolve_status(TaskStatus::Pending, None, Some(TaskStatus::Blocked)),
///     TaskStatus::Blocked
/// );
/// ```
pub fn resolve_status(
    current: TaskStatus,
    percent: Option<f64>,
    explicit: Option<TaskStatus>,
) -> TaskStatus {
    let base = explicit.unwrap_or(current);
    match percent {
        Some(p) if p >= 1.0 => TaskStatus::Completed,
        Some(p) if p > 0.0 => TaskStatus::InProgress,
        Some(_) if base == TaskStatus::Completed => TaskStatus::Pending,
        _ => base,
    }
}

/// Field-level checks that hold for every stored task.
fn validate_fields(task: &Task) -> Result<()> {
    if task.text.trim().is_empty() {
        return Err(TrellisError::validation("text").with_reason("Task text cannot be empty"));
    }
    if task.end < task.start {
        return Err(TrellisError::validation("end").with_reason(format!(
            "End date {} is before start date {}",
            task.end, task.start
        )));
    }
    if !(0.0..=1.0).contains(&task.percent) {
        return Err(TrellisError::validation("percent")
            .with_reason(format!("Percent must be between 0 and 1, got {}", task.percent)));
    }
    if let Some(cost) = task.cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(TrellisError::validation("cost")
                .with_reason(format!("Cost must be a non-negative number, got {cost}")));
        }
    }
    Ok(())
}

/// Owns one project's store and enforces the task invariants on every write.
#[derive(Debug)]
pub struct TaskCoordinator<S> {
    store: S,
}

impl<S: TaskStore> TaskCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All tasks in collection order, with group costs rolled up.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        Ok(cost::with_calculated_costs(&self.store.list_tasks()?))
    }

    /// A single task, with its cost rolled up when it is a group.
    pub fn get(&self, id: u64) -> Result<Task> {
        let tasks = self.store.list_tasks()?;
        let mut task = hierarchy::find(id, &tasks)
            .cloned()
            .ok_or(TrellisError::TaskNotFound { id })?;
        if task.is_group() {
            task.cost = Some(cost::group_cost(id, &tasks));
        }
        Ok(task)
    }

    /// Numbered tree rows with rolled-up costs.
    pub fn outline(&self) -> Result<Vec<OutlineEntry>> {
        Ok(hierarchy::outline(&self.tasks()?))
    }

    /// Groups the task may move under; `None` asks on behalf of a task that
    /// does not exist yet.
    pub fn eligible_parents(&self, id: Option<u64>) -> Result<Vec<Task>> {
        let tasks = self.store.list_tasks()?;
        let candidate = self.candidate(id, &tasks)?;
        Ok(dependency::eligible_parents(candidate, &tasks)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Tasks the task may depend on; `None` asks on behalf of a task that
    /// does not exist yet.
    pub fn eligible_dependency_targets(&self, id: Option<u64>) -> Result<Vec<Task>> {
        let tasks = self.store.list_tasks()?;
        let candidate = self.candidate(id, &tasks)?;
        Ok(dependency::eligible_dependency_targets(candidate, &tasks)
            .into_iter()
            .cloned()
            .collect())
    }

    fn candidate<'a>(&self, id: Option<u64>, tasks: &'a [Task]) -> Result<Option<&'a Task>> {
        match id {
            None => Ok(None),
            Some(id) => hierarchy::find(id, tasks)
                .map(Some)
                .ok_or(TrellisError::TaskNotFound { id }),
        }
    }

    /// Creates a task and inserts it after its parent's subtree.
    ///
    /// A parent id that matches no task is dropped and the task is appended
    /// at the top level.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - Empty text, inverted dates, percent or
    ///   cost out of range, a non-group parent or an unknown link target
    /// * `TrellisError::Cycle` - Never raised for a fresh task, which has no
    ///   subtree yet
    pub fn create(&mut self, fields: NewTask) -> Result<Task> {
        let tasks = self.store.list_tasks()?;

        let mut parent = fields.parent;
        if let Some(parent_id) = parent {
            if hierarchy::find(parent_id, &tasks).is_none() {
                warn!("Parent {parent_id} not found; creating '{}' at the top level", fields.text);
                parent = None;
            }
        }
        if let Some(parent_id) = parent {
            dependency::check_parent(None, parent_id, &tasks)?;
        }
        dependency::check_links(None, &fields.links, &tasks)?;

        let mut task = Task {
            id: self.store.next_task_id()?,
            parent,
            kind: fields.kind,
            text: fields.text,
            description: fields.description,
            start: fields.start,
            end: fields.end,
            percent: fields.percent,
            status: resolve_status(TaskStatus::Pending, Some(fields.percent), fields.status),
            priority: fields.priority,
            assignee: fields.assignee,
            cost: fields.cost,
            links: fields.links,
        };
        validate_fields(&task)?;
        task.normalize();

        let index = hierarchy::insertion_index(parent, &tasks);
        self.store.insert(index, task.clone())?;
        debug!("Created task {} at position {index}", task.id);
        Ok(task)
    }

    /// Applies `changes` to an existing task. The task keeps its position.
    ///
    /// # Errors
    ///
    /// * `TrellisError::TaskNotFound` - No task has this id
    /// * `TrellisError::Validation` - A field is out of range, the new
    ///   parent is unknown or not a group, or a group with children would
    ///   change type
    /// * `TrellisError::Cycle` - The new parent or a link target lies in the
    ///   task's own subtree
    pub fn update(&mut self, id: u64, changes: TaskChanges) -> Result<Task> {
        let tasks = self.store.list_tasks()?;
        let current = hierarchy::find(id, &tasks)
            .cloned()
            .ok_or(TrellisError::TaskNotFound { id })?;

        if let Some(kind) = changes.kind {
            if current.is_group() && kind != TaskKind::Group && hierarchy::has_children(id, &tasks) {
                return Err(TrellisError::validation("type").with_reason(format!(
                    "Task {id} still contains tasks and must remain a group"
                )));
            }
        }

        let mut task = current.clone();
        if let Some(parent) = changes.parent {
            if let Some(parent_id) = parent {
                dependency::check_parent(Some(id), parent_id, &tasks)?;
            }
            task.parent = parent;
        }
        if let Some(links) = changes.links {
            dependency::check_links(Some(id), &links, &tasks)?;
            task.links = links;
        }
        if let Some(kind) = changes.kind {
            task.kind = kind;
        }
        if let Some(text) = changes.text {
            task.text = text;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(start) = changes.start {
            task.start = start;
        }
        if let Some(end) = changes.end {
            task.end = end;
        }
        if let Some(percent) = changes.percent {
            task.percent = percent;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(assignee) = changes.assignee {
            task.assignee = assignee;
        }
        if let Some(cost) = changes.cost {
            task.cost = cost;
        }
        task.status = resolve_status(current.status, changes.percent, changes.status);

        validate_fields(&task)?;
        task.normalize();

        self.store.replace(task.clone())?;
        debug!("Updated task {id}");
        Ok(task)
    }

    /// Deletes a task together with its whole subtree.
    ///
    /// Links held by surviving tasks that point into the removed subtree are
    /// dropped in the same write. Returns the removed ids, task first; an
    /// unknown id removes nothing and is not an error.
    pub fn delete(&mut self, id: u64) -> Result<Vec<u64>> {
        let tasks = self.store.list_tasks()?;
        if hierarchy::find(id, &tasks).is_none() {
            debug!("Task {id} already absent; nothing to delete");
            return Ok(Vec::new());
        }

        let mut removed = vec![id];
        removed.extend(hierarchy::descendant_ids(id, &tasks));
        let gone: HashSet<u64> = removed.iter().copied().collect();

        let relinked: Vec<Task> = tasks
            .iter()
            .filter(|t| !gone.contains(&t.id))
            .filter(|t| t.links.iter().any(|l| gone.contains(&l.target)))
            .map(|t| {
                let mut t = t.clone();
                t.links.retain(|l| !gone.contains(&l.target));
                t
            })
            .collect();

        self.store.remove(&removed, relinked)?;
        debug!("Deleted task {id} and {} descendants", removed.len() - 1);
        Ok(removed)
    }
}
