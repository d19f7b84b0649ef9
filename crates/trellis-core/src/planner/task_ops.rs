//! Task operations for the Planner.
//!
//! Each method runs exactly one coordinator operation against one project.

use super::Planner;
use crate::{
    error::{Result, TrellisError},
    hierarchy::OutlineEntry,
    models::{NewTask, Task, TaskChanges},
    params::{Eligibility, Id, TaskCreate, TaskRef, UpdateTask},
};

impl Planner {
    /// Adds a task to a project.
    ///
    /// The task is placed after the last task of its parent's subtree, or at
    /// the end when it has no parent. An unknown parent is dropped.
    ///
    /// # Errors
    ///
    /// * `TrellisError::ProjectNotFound` - No project has this id
    /// * `TrellisError::Validation` - Invalid field values, a non-group
    ///   parent or an unknown link target
    pub async fn add_task(&self, params: &TaskCreate) -> Result<Task> {
        let fields = NewTask::try_from(params.clone())?;
        self.write_tasks(params.project_id, move |tasks| tasks.create(fields))
            .await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - No field was given, or a value is
    ///   invalid
    /// * `TrellisError::TaskNotFound` - No task has this id in the project
    /// * `TrellisError::Cycle` - The new parent or a link target lies inside
    ///   the task's own subtree
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let changes = TaskChanges::try_from(params.clone())?;
        if changes.is_empty() {
            return Err(TrellisError::validation("changes")
                .with_reason("At least one field must be provided for update"));
        }

        let id = params.id;
        self.write_tasks(params.project_id, move |tasks| tasks.update(id, changes))
            .await
    }

    /// Deletes a task and its whole subtree, returning every removed id.
    ///
    /// Removing a task that does not exist returns an empty list.
    pub async fn remove_task(&self, params: &TaskRef) -> Result<Vec<u64>> {
        let id = params.id;
        self.write_tasks(params.project_id, move |tasks| tasks.delete(id))
            .await
    }

    /// A single task, with its cost rolled up when it is a group.
    pub async fn get_task(&self, params: &TaskRef) -> Result<Task> {
        let id = params.id;
        self.read_tasks(params.project_id, move |tasks| tasks.get(id))
            .await
    }

    /// All tasks of a project in collection order, group costs rolled up.
    pub async fn get_tasks(&self, params: &Id) -> Result<Vec<Task>> {
        self.read_tasks(params.id, |tasks| tasks.tasks()).await
    }

    /// Numbered, depth-annotated task rows of a project.
    pub async fn outline(&self, params: &Id) -> Result<Vec<OutlineEntry>> {
        self.read_tasks(params.id, |tasks| tasks.outline()).await
    }

    /// Groups the task may be moved under.
    pub async fn eligible_parents(&self, params: &Eligibility) -> Result<Vec<Task>> {
        let id = params.id;
        self.read_tasks(params.project_id, move |tasks| tasks.eligible_parents(id))
            .await
    }

    /// Tasks the task may depend on.
    pub async fn eligible_dependencies(&self, params: &Eligibility) -> Result<Vec<Task>> {
        let id = params.id;
        self.read_tasks(params.project_id, move |tasks| {
            tasks.eligible_dependency_targets(id)
        })
        .await
    }
}
