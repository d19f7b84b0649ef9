//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create, update,
//! and delete operations with consistent messaging and resource display.

use std::fmt;

use crate::models::{Project, Task};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use trellis_core::{display::CreateResult, lifecycle::TaskCoordinator, store::MemoryStore, models::NewTask};
///
/// let mut coordinator = TaskCoordinator::new(MemoryStore::new());
/// let task = coordinator.create(NewTask::new("Survey", date(2024, 4, 1), date(2024, 4, 3)))?;
///
/// let output = CreateResult::new(task).to_string();
/// assert!(output.starts_with("Created task with ID: 1"));
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created project with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// names of the fields that were changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: fmt::Display> UpdateResult<T> {
    fn write(&self, f: &mut fmt::Formatter<'_>, kind: &str, id: u64) -> fmt::Result {
        writeln!(f, "Updated {kind} with ID: {id}")?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changed fields: {}", self.changes.join(", "))?;
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, "project", self.resource.id)
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, "task", self.resource.id)
    }
}

/// Wrapper type for displaying the result of delete operations.
///
/// `removed` lists every id that went away with the resource, the resource
/// itself included.
pub struct DeleteResult<T> {
    pub resource: T,
    pub removed: Vec<u64>,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            removed: Vec::new(),
        }
    }

    pub fn with_removed(resource: T, removed: Vec<u64>) -> Self {
        Self { resource, removed }
    }
}

impl fmt::Display for DeleteResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted project '{}' (ID: {}) and its {} tasks",
            self.resource.name,
            self.resource.id,
            self.resource.tasks.len()
        )
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.text, self.resource.id
        )?;

        let cascaded: Vec<String> = self
            .removed
            .iter()
            .filter(|id| **id != self.resource.id)
            .map(ToString::to_string)
            .collect();
        if !cascaded.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Also removed {} nested tasks: {}",
                cascaded.len(),
                cascaded.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::testing::{group, task};

    #[test]
    fn test_update_result_lists_changed_fields() {
        let result = UpdateResult::with_changes(
            task(4, None),
            vec!["percent".to_string(), "status".to_string()],
        );
        let output = result.to_string();

        assert!(output.starts_with("Updated task with ID: 4"));
        assert!(output.contains("Changed fields: percent, status"));
    }

    #[test]
    fn test_update_result_for_project() {
        let now = jiff::Timestamp::now();
        let project = Project {
            id: 3,
            name: "Launch".to_string(),
            description: None,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 2, 1),
            created_at: now,
            updated_at: now,
            tasks: vec![],
        };
        let output = UpdateResult::with_changes(project, vec!["name".to_string()]).to_string();

        assert!(output.starts_with("Updated project with ID: 3"));
        assert!(output.contains("Changed fields: name"));
        assert!(output.contains("Launch"));
    }

    #[test]
    fn test_delete_result_reports_cascade() {
        let output = DeleteResult::with_removed(group(1, None), vec![1, 11, 12]).to_string();
        assert!(output.contains("Deleted task 'Task 1' (ID: 1)"));
        assert!(output.contains("Also removed 2 nested tasks: 11, 12"));

        let single = DeleteResult::with_removed(task(5, None), vec![5]).to_string();
        assert!(!single.contains("Also removed"));
    }
}
