//! Project-scoped task storage on SQLite.

use jiff::civil::Date;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, TrellisError},
    models::{Task, TaskKind, TaskLink},
    store::TaskStore,
};

const TASK_COLUMNS: &str = "id, parent_id, type, text, description, start_date, end_date, percent, status, priority, assignee, cost, links";
const SELECT_NEXT_TASK_ID_SQL: &str = "SELECT next_task_id FROM projects WHERE id = ?1";
const SELECT_POSITION_AT_SQL: &str =
    "SELECT position FROM tasks WHERE project_id = ?1 ORDER BY position LIMIT 1 OFFSET ?2";
const SELECT_END_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE project_id = ?1";
const UPDATE_POSITIONS_INCREMENT_SQL: &str =
    "UPDATE tasks SET position = position + 1 WHERE project_id = ?1 AND position >= ?2";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (project_id, id, position, parent_id, type, text, description, start_date, end_date, percent, status, priority, assignee, cost, links) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const ADVANCE_TASK_COUNTER_SQL: &str =
    "UPDATE projects SET next_task_id = MAX(next_task_id, ?1) WHERE id = ?2";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET parent_id = ?3, type = ?4, text = ?5, description = ?6, start_date = ?7, end_date = ?8, percent = ?9, status = ?10, priority = ?11, assignee = ?12, cost = ?13, links = ?14 WHERE project_id = ?1 AND id = ?2";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE project_id = ?1 AND id = ?2";

/// A [`TaskStore`] over one project's rows.
///
/// Mutations issue several statements each. Build the store on a
/// transaction, as [`super::Database::write_tasks`] does, so that each
/// mutation commits or rolls back as a whole.
pub struct SqliteTaskStore<'c> {
    connection: &'c Connection,
    project_id: u64,
}

fn conversion_error(
    index: usize,
    error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, error.into())
}

fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(index, format!("Invalid value '{raw}': {e}")))
}

impl<'c> SqliteTaskStore<'c> {
    pub fn new(connection: &'c Connection, project_id: u64) -> Self {
        Self {
            connection,
            project_id,
        }
    }

    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &Row) -> rusqlite::Result<Task> {
        let links_json: String = row.get(12)?;
        let links: Vec<TaskLink> =
            serde_json::from_str(&links_json).map_err(|e| conversion_error(12, e))?;

        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            parent: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            kind: parse_column::<TaskKind>(row, 2)?,
            text: row.get(3)?,
            description: row.get(4)?,
            start: parse_column::<Date>(row, 5)?,
            end: parse_column::<Date>(row, 6)?,
            percent: row.get(7)?,
            status: parse_column(row, 8)?,
            priority: parse_column(row, 9)?,
            assignee: row.get(10)?,
            cost: row.get(11)?,
            links,
        })
    }

    fn write_fields(&self, sql: &str, position: Option<i64>, task: &Task) -> Result<usize> {
        let links = serde_json::to_string(&task.links)?;
        let project_id = self.project_id as i64;
        let id = task.id as i64;
        let parent = task.parent.map(|p| p as i64);
        let start = task.start.to_string();
        let end = task.end.to_string();

        let rows = match position {
            Some(position) => self.connection.execute(
                sql,
                params![
                    project_id,
                    id,
                    position,
                    parent,
                    task.kind.as_str(),
                    task.text,
                    task.description,
                    start,
                    end,
                    task.percent,
                    task.status.as_str(),
                    task.priority.as_str(),
                    task.assignee,
                    task.cost,
                    links
                ],
            ),
            None => self.connection.execute(
                sql,
                params![
                    project_id,
                    id,
                    parent,
                    task.kind.as_str(),
                    task.text,
                    task.description,
                    start,
                    end,
                    task.percent,
                    task.status.as_str(),
                    task.priority.as_str(),
                    task.assignee,
                    task.cost,
                    links
                ],
            ),
        };
        rows.db_context("Failed to write task")
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1 ORDER BY position"
            ))
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![self.project_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        Ok(tasks)
    }

    fn next_task_id(&self) -> Result<u64> {
        let next: Option<i64> = self
            .connection
            .query_row(SELECT_NEXT_TASK_ID_SQL, params![self.project_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to read task id counter")?;

        next.map(|id| id as u64).ok_or(TrellisError::ProjectNotFound {
            id: self.project_id,
        })
    }

    fn insert(&mut self, index: usize, task: Task) -> Result<()> {
        let project_id = self.project_id as i64;

        let occupied: Option<i64> = self
            .connection
            .query_row(SELECT_POSITION_AT_SQL, params![project_id, index as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up insertion position")?;

        let position = match occupied {
            Some(position) => {
                // Make room for the new task
                self.connection
                    .execute(UPDATE_POSITIONS_INCREMENT_SQL, params![project_id, position])
                    .db_context("Failed to update task positions")?;
                position
            }
            None => self
                .connection
                .query_row(SELECT_END_POSITION_SQL, params![project_id], |row| row.get(0))
                .db_context("Failed to get next task position")?,
        };

        self.write_fields(INSERT_TASK_SQL, Some(position), &task)?;

        self.connection
            .execute(
                ADVANCE_TASK_COUNTER_SQL,
                params![task.id as i64 + 1, project_id],
            )
            .db_context("Failed to advance task id counter")?;

        Ok(())
    }

    fn replace(&mut self, task: Task) -> Result<()> {
        let rows = self.write_fields(UPDATE_TASK_SQL, None, &task)?;
        if rows == 0 {
            return Err(TrellisError::TaskNotFound { id: task.id });
        }
        Ok(())
    }

    fn remove(&mut self, ids: &[u64], relinked: Vec<Task>) -> Result<()> {
        for task in relinked {
            self.replace(task)?;
        }
        for id in ids {
            self.connection
                .execute(DELETE_TASK_SQL, params![self.project_id as i64, *id as i64])
                .db_context("Failed to delete task")?;
        }
        Ok(())
    }
}
