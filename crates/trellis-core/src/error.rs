//! Error types for the task-hierarchy engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all trellis operations.
#[derive(Error, Debug)]
pub enum TrellisError {
    /// A field value or combination of values violates a task invariant
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// The proposed parent or dependency target would introduce a cycle
    #[error("Task {task_id} cannot use task {target_id} as {relation}: it would create a cycle")]
    Cycle {
        task_id: u64,
        target_id: u64,
        relation: Relation,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Which structural edge a [`TrellisError::Cycle`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Parent,
    Dependency,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Parent => write!(f, "parent"),
            Relation::Dependency => write!(f, "dependency"),
        }
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrellisError {
        TrellisError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrellisError {
        TrellisError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrellisError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Creates a cycle error for the given edge.
    pub fn cycle(task_id: u64, target_id: u64, relation: Relation) -> Self {
        Self::Cycle {
            task_id,
            target_id,
            relation,
        }
    }

    /// Wraps a blocking-task join failure.
    pub(crate) fn join(e: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {e}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrellisError::database(message).with_source(e))
    }
}

/// Result type alias for trellis operations
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_builder() {
        let err = TrellisError::validation("end").with_reason("End date precedes start date");
        match err {
            TrellisError::Validation { field, reason } => {
                assert_eq!(field, "end");
                assert!(reason.contains("precedes"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_cycle_message_names_relation() {
        let err = TrellisError::cycle(1, 12, Relation::Parent);
        let message = err.to_string();
        assert!(message.contains("task 12 as parent"));
    }
}
