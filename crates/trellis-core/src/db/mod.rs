//! SQLite persistence for projects and their task collections.
//!
//! Projects are plain rows. A project's tasks are reached through
//! [`SqliteTaskStore`], a [`crate::store::TaskStore`] scoped to one project,
//! so the lifecycle coordinator runs unchanged against the database.
//! [`Database::write_tasks`] wraps each coordinator operation in a
//! transaction, which makes the store's multi-statement writes atomic.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod project_queries;
pub mod task_store;

pub use task_store::SqliteTaskStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        // Writers on other projects may hold the file lock briefly
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
