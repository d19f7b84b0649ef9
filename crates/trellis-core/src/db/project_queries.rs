//! Project CRUD operations and task store access.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension, Row};

use super::SqliteTaskStore;
use crate::{
    cost,
    error::{DatabaseResultExt, Result, TrellisError},
    lifecycle::TaskCoordinator,
    models::{Project, ProjectSummary},
    params::{check_project_dates, UpdateProject},
    store::TaskStore,
};

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (name, description, start_date, end_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PROJECT_SQL: &str = "SELECT id, name, description, start_date, end_date, created_at, updated_at FROM projects WHERE id = ?1";
const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const UPDATE_PROJECT_SQL: &str = "UPDATE projects SET name = ?1, description = ?2, start_date = ?3, end_date = ?4, updated_at = ?5 WHERE id = ?6";
const UPDATE_PROJECT_TIMESTAMP_SQL: &str = "UPDATE projects SET updated_at = ?1 WHERE id = ?2";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";
const SELECT_PROJECT_SUMMARIES_SQL: &str = "SELECT id, name, description, start_date, end_date, created_at, updated_at, total_tasks, completed_tasks, total_cost FROM project_summaries ORDER BY created_at DESC, id DESC";

fn text_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.get::<_, String>(index)?
        .parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

impl super::Database {
    /// Helper function to construct a Project, without tasks, from a row
    fn build_project_from_row(row: &Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            description: row.get(2)?,
            start_date: text_column::<Date>(row, 3)?,
            end_date: text_column::<Date>(row, 4)?,
            created_at: text_column::<Timestamp>(row, 5)?,
            updated_at: text_column::<Timestamp>(row, 6)?,
            tasks: Vec::new(),
        })
    }

    fn project_exists(connection: &rusqlite::Connection, id: u64) -> Result<bool> {
        connection
            .query_row(CHECK_PROJECT_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check project existence")
    }

    /// Creates a new, empty project.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        start_date: Date,
        end_date: Date,
    ) -> Result<Project> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PROJECT_SQL,
            params![
                name,
                description,
                start_date.to_string(),
                end_date.to_string(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert project")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Project {
            id,
            name: name.into(),
            description: description.map(String::from),
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
        })
    }

    /// Retrieves a project with its tasks, group costs rolled up.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        let mut project = self
            .connection
            .query_row(SELECT_PROJECT_SQL, params![id as i64], Self::build_project_from_row)
            .optional()
            .db_context("Failed to query project")?;

        if let Some(ref mut project) = project {
            let tasks = SqliteTaskStore::new(&self.connection, project.id).list_tasks()?;
            project.tasks = cost::with_calculated_costs(&tasks);
        }

        Ok(project)
    }

    /// Lists every project with task statistics, newest first.
    pub fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PROJECT_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                let project = Self::build_project_from_row(row)?;
                Ok(ProjectSummary {
                    id: project.id,
                    name: project.name,
                    description: project.description,
                    start_date: project.start_date,
                    end_date: project.end_date,
                    created_at: project.created_at,
                    updated_at: project.updated_at,
                    total_tasks: row.get::<_, i64>(7)? as u32,
                    completed_tasks: row.get::<_, i64>(8)? as u32,
                    total_cost: row.get(9)?,
                })
            })
            .db_context("Failed to query projects")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch projects")?;

        Ok(summaries)
    }

    /// Applies a partial update to a project's details.
    ///
    /// Supplied fields are merged over the stored ones before the date order
    /// is checked. An empty description clears it.
    ///
    /// # Errors
    ///
    /// * `TrellisError::ProjectNotFound` - No project has this id
    /// * `TrellisError::Validation` - Empty name, or the merged end date falls
    ///   before the merged start date
    pub fn update_project(&mut self, changes: &UpdateProject) -> Result<Project> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut project = tx
            .query_row(SELECT_PROJECT_SQL, params![changes.id as i64], Self::build_project_from_row)
            .optional()
            .db_context("Failed to query project")?
            .ok_or(TrellisError::ProjectNotFound { id: changes.id })?;

        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(TrellisError::validation("name").with_reason("Project name is required"));
            }
            project.name = name.clone();
        }
        if let Some(description) = &changes.description {
            project.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(start_date) = changes.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            project.end_date = end_date;
        }
        check_project_dates(project.start_date, project.end_date)?;

        project.updated_at = Timestamp::now();
        tx.execute(
            UPDATE_PROJECT_SQL,
            params![
                project.name,
                project.description,
                project.start_date.to_string(),
                project.end_date.to_string(),
                project.updated_at.to_string(),
                changes.id as i64
            ],
        )
        .db_context("Failed to update project")?;

        let tasks = SqliteTaskStore::new(&tx, changes.id).list_tasks()?;
        project.tasks = cost::with_calculated_costs(&tasks);

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(project)
    }

    /// Permanently deletes a project and all of its tasks.
    pub fn delete_project(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::project_exists(&tx, id)? {
            return Err(TrellisError::ProjectNotFound { id });
        }

        // Tasks go with it through ON DELETE CASCADE
        tx.execute(DELETE_PROJECT_SQL, params![id as i64])
            .db_context("Failed to delete project")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Runs a read-only coordinator query against a project's tasks.
    pub fn read_tasks<T, F>(&self, project_id: u64, query: F) -> Result<T>
    where
        F: FnOnce(&TaskCoordinator<SqliteTaskStore<'_>>) -> Result<T>,
    {
        if !Self::project_exists(&self.connection, project_id)? {
            return Err(TrellisError::ProjectNotFound { id: project_id });
        }

        let coordinator = TaskCoordinator::new(SqliteTaskStore::new(&self.connection, project_id));
        query(&coordinator)
    }

    /// Runs a coordinator operation against a project's tasks inside one
    /// transaction.
    ///
    /// The transaction commits, and the project's `updated_at` advances, only
    /// when `operation` succeeds. Any error rolls every write back.
    pub fn write_tasks<T, F>(&mut self, project_id: u64, operation: F) -> Result<T>
    where
        F: FnOnce(&mut TaskCoordinator<SqliteTaskStore<'_>>) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::project_exists(&tx, project_id)? {
            return Err(TrellisError::ProjectNotFound { id: project_id });
        }

        let result = {
            let mut coordinator = TaskCoordinator::new(SqliteTaskStore::new(&tx, project_id));
            operation(&mut coordinator)?
        };

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), project_id as i64],
        )
        .db_context("Failed to update project timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::super::Database;
    use crate::{
        error::TrellisError,
        models::{NewTask, TaskKind, TaskStatus},
        params::UpdateProject,
        store::TaskStore,
    };

    fn database_with_project() -> (Database, u64) {
        let mut db = Database::in_memory().unwrap();
        let project = db
            .create_project("Website", None, date(2024, 1, 1), date(2024, 6, 30))
            .unwrap();
        (db, project.id)
    }

    fn fields(text: &str) -> NewTask {
        NewTask::new(text, date(2024, 2, 1), date(2024, 2, 10))
    }

    #[test]
    fn test_create_and_get_project() {
        let (db, id) = database_with_project();
        let project = db.get_project(id).unwrap().unwrap();

        assert_eq!(project.name, "Website");
        assert_eq!(project.end_date, date(2024, 6, 30));
        assert!(project.tasks.is_empty());
        assert!(db.get_project(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_update_project_merges_fields() {
        let (mut db, id) = database_with_project();
        let before = db.get_project(id).unwrap().unwrap();

        let updated = db
            .update_project(&UpdateProject {
                id,
                name: Some("Website v2".to_string()),
                end_date: Some(date(2024, 9, 30)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.name, "Website v2");
        assert_eq!(updated.start_date, date(2024, 1, 1));
        assert_eq!(updated.end_date, date(2024, 9, 30));
        assert!(updated.updated_at >= before.updated_at);
        assert_eq!(db.get_project(id).unwrap().unwrap().name, "Website v2");
    }

    #[test]
    fn test_update_project_checks_merged_dates() {
        let (mut db, id) = database_with_project();

        let result = db.update_project(&UpdateProject {
            id,
            end_date: Some(date(2023, 12, 31)),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(TrellisError::Validation { ref field, .. }) if field == "end_date"
        ));
        assert_eq!(db.get_project(id).unwrap().unwrap().end_date, date(2024, 6, 30));

        let missing = db.update_project(&UpdateProject {
            id: id + 1,
            name: Some("Ghost".to_string()),
            ..Default::default()
        });
        assert!(matches!(missing, Err(TrellisError::ProjectNotFound { .. })));
    }

    #[test]
    fn test_sqlite_store_preserves_insertion_order() {
        let (mut db, id) = database_with_project();

        db.write_tasks(id, |c| {
            let phase = c.create(fields("Phase").with_kind(TaskKind::Group))?;
            c.create(fields("After"))?;
            c.create(fields("Inside").with_parent(phase.id))?;
            c.create(fields("Inside too").with_parent(phase.id))
        })
        .unwrap();

        let order: Vec<u64> = db
            .read_tasks(id, |c| c.tasks())
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(order, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_sqlite_store_ids_survive_deletes() {
        let (mut db, id) = database_with_project();

        db.write_tasks(id, |c| {
            c.create(fields("One"))?;
            let two = c.create(fields("Two"))?;
            c.delete(two.id)
        })
        .unwrap();

        let next = db.write_tasks(id, |c| c.create(fields("Three"))).unwrap();
        assert_eq!(next.id, 3);
        let stored = db.read_tasks(id, |c| Ok(c.store().next_task_id()?)).unwrap();
        assert_eq!(stored, 4);
    }

    #[test]
    fn test_failed_operation_rolls_back() {
        let (mut db, id) = database_with_project();

        let result = db.write_tasks(id, |c| {
            c.create(fields("Kept only if committed"))?;
            c.create(NewTask::new("Backwards", date(2024, 2, 10), date(2024, 2, 1)))
        });

        assert!(matches!(result, Err(TrellisError::Validation { .. })));
        assert!(db.read_tasks(id, |c| c.tasks()).unwrap().is_empty());
    }

    #[test]
    fn test_task_fields_round_trip_through_sqlite() {
        let (mut db, id) = database_with_project();

        let created = db
            .write_tasks(id, |c| {
                c.create(fields("Target"))?;
                let mut new = fields("Linked")
                    .with_cost(42.5)
                    .with_percent(0.25)
                    .with_links(vec!["1:SS".parse().unwrap()]);
                new.description = Some("Multi\nline".to_string());
                new.assignee = Some("dana".to_string());
                c.create(new)
            })
            .unwrap();

        let stored = db.read_tasks(id, |c| c.get(created.id)).unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_summaries_and_cascade_delete() {
        let (mut db, id) = database_with_project();
        db.write_tasks(id, |c| {
            let phase = c.create(fields("Phase").with_kind(TaskKind::Group))?;
            c.create(fields("Build").with_parent(phase.id).with_cost(100.0).with_percent(1.0))?;
            c.create(fields("Gate").with_kind(TaskKind::Milestone))
        })
        .unwrap();

        let summaries = db.list_projects().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_tasks, 3);
        assert_eq!(summaries[0].completed_tasks, 1);
        assert_eq!(summaries[0].total_cost, 100.0);

        db.delete_project(id).unwrap();
        assert!(db.list_projects().unwrap().is_empty());
        assert!(matches!(
            db.read_tasks(id, |c| c.tasks()),
            Err(TrellisError::ProjectNotFound { .. })
        ));
        assert!(matches!(
            db.delete_project(id),
            Err(TrellisError::ProjectNotFound { .. })
        ));
    }
}
