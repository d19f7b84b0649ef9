//! Planner operations that return display wrapper types.
//!
//! These wrap the plain operations in [`super::project_ops`] and
//! [`super::task_ops`] with the extra context interface layers show to
//! users: confirmation checks, changed-field lists and cascade reports.

use std::collections::HashSet;

use super::Planner;
use crate::{
    display::{DeleteResult, Outline, ProjectSummaries, Tasks, UpdateResult},
    error::{Result, TrellisError},
    hierarchy::OutlineEntry,
    models::{Project, Task, TaskChanges},
    params::{DeleteProject, Eligibility, Id, TaskRef, UpdateProject, UpdateTask},
};

/// Outline rows of the `eligible` tasks, in collection order.
fn numbered(eligible: &[Task], outline: Vec<OutlineEntry>) -> Tasks {
    let ids: HashSet<u64> = eligible.iter().map(|t| t.id).collect();
    Tasks(outline.into_iter().filter(|e| ids.contains(&e.task.id)).collect())
}

impl Planner {
    /// All projects as a displayable summary list.
    pub async fn list_projects_summary(&self) -> Result<ProjectSummaries> {
        Ok(ProjectSummaries(self.list_projects().await?))
    }

    /// Permanently deletes a project, returning what was deleted.
    ///
    /// Returns `None` if the project does not exist.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - `confirmed` is false
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use trellis_core::{params::DeleteProject, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = DeleteProject { id: 1, confirmed: true };
    /// let deleted = planner.delete_project(&params).await?;
    /// # Result::<(), trellis_core::TrellisError>::Ok(())
    /// # };
    /// ```
    pub async fn delete_project(&self, params: &DeleteProject) -> Result<Option<Project>> {
        if !params.confirmed {
            return Err(TrellisError::validation("confirmed").with_reason(
                "Project deletion removes every task and cannot be undone. Set 'confirmed' to true to proceed.",
            ));
        }

        let id = Id { id: params.id };
        let project = self.get_project(&id).await?;
        if project.is_some() {
            self.delete_project_by_id(&id).await?;
        }
        Ok(project)
    }

    /// Updates a project and reports which fields the request touched.
    pub async fn update_project_result(
        &self,
        params: &UpdateProject,
    ) -> Result<UpdateResult<Project>> {
        let project = self.update_project(params).await?;
        Ok(UpdateResult::with_changes(project, params.changed_fields()))
    }

    /// Updates a task and reports which fields the request touched.
    pub async fn update_task_result(&self, params: &UpdateTask) -> Result<UpdateResult<Task>> {
        let changed = TaskChanges::try_from(params.clone())?.changed_fields();
        let task = self.update_task(params).await?;
        Ok(UpdateResult::with_changes(task, changed))
    }

    /// Deletes a task with its subtree and reports what went away.
    ///
    /// The lookup and the delete run in one transaction. Returns `None` when
    /// the task does not exist.
    pub async fn remove_task_result(&self, params: &TaskRef) -> Result<Option<DeleteResult<Task>>> {
        let id = params.id;
        self.write_tasks(params.project_id, move |tasks| match tasks.get(id) {
            Ok(task) => {
                let removed = tasks.delete(id)?;
                Ok(Some(DeleteResult::with_removed(task, removed)))
            }
            Err(TrellisError::TaskNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    /// Groups the task may be moved under, with their outline numbers.
    pub async fn eligible_parents_list(&self, params: &Eligibility) -> Result<Tasks> {
        let id = params.id;
        self.read_tasks(params.project_id, move |tasks| {
            Ok(numbered(&tasks.eligible_parents(id)?, tasks.outline()?))
        })
        .await
    }

    /// Tasks the task may depend on, with their outline numbers.
    pub async fn eligible_dependencies_list(&self, params: &Eligibility) -> Result<Tasks> {
        let id = params.id;
        self.read_tasks(params.project_id, move |tasks| {
            Ok(numbered(
                &tasks.eligible_dependency_targets(id)?,
                tasks.outline()?,
            ))
        })
        .await
    }

    /// The numbered task tree of a project.
    pub async fn project_outline(&self, params: &Id) -> Result<Outline> {
        Ok(Outline(self.outline(params).await?))
    }
}
