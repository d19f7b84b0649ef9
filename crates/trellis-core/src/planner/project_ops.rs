//! Project operations for the Planner.

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, TrellisError},
    models::{Project, ProjectSummary},
    params::{CreateProject, Id, UpdateProject},
};

impl Planner {
    /// Creates a new, empty project.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - Empty name or end date before start date
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let params = params.clone();

        let project = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_project(
                &params.name,
                params.description.as_deref(),
                params.start_date,
                params.end_date,
            )
        })
        .await
        .map_err(TrellisError::join)??;

        debug!("Created project {} '{}'", project.id, project.name);
        Ok(project)
    }

    /// Retrieves a project with all of its tasks, group costs rolled up.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_project(project_id)
        })
        .await
        .map_err(TrellisError::join)?
    }

    /// Lists every project with task counts and total cost, newest first.
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_projects()
        })
        .await
        .map_err(TrellisError::join)?
    }

    /// Permanently deletes a project and all of its tasks.
    ///
    /// # Errors
    ///
    /// * `TrellisError::ProjectNotFound` - No project has this id
    pub async fn delete_project_by_id(&self, params: &Id) -> Result<()> {
        let project_id = params.id;
        let lock = self.project_lock(project_id);
        let guard = lock.lock().await;
        let db_path = self.db_path.clone();

        let result = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_project(project_id)
        })
        .await
        .map_err(TrellisError::join);

        drop(guard);
        drop(lock);
        self.prune_locks();
        result??;

        debug!("Deleted project {project_id}");
        Ok(())
    }

    /// Updates a project's name, description or dates.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - No field supplied, an empty name, or an
    ///   end date before the start date
    /// * `TrellisError::ProjectNotFound` - No project has this id
    pub async fn update_project(&self, params: &UpdateProject) -> Result<Project> {
        params.validate()?;

        let lock = self.project_lock(params.id);
        let _guard = lock.lock().await;
        let db_path = self.db_path.clone();
        let params = params.clone();

        let project = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_project(&params)
        })
        .await
        .map_err(TrellisError::join)??;

        debug!("Updated project {} '{}'", project.id, project.name);
        Ok(project)
    }
}
