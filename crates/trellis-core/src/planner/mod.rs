//! Async facade over the database for projects and tasks.
//!
//! [`Planner`] is what interface layers talk to. Each call opens the SQLite
//! database on a blocking thread, runs one [`crate::lifecycle::TaskCoordinator`]
//! operation or project query, and closes it again.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display types, │───▶│ (project_ops,   │───▶│ (db/, one tx    │
//! │  confirmation)  │    │  task_ops)      │    │  per mutation)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Mutating operations on the same project are serialized by a per-project
//! async lock, so concurrent callers never interleave their
//! snapshot-validate-write sequences. Reads take no lock. Lock entries are
//! dropped once nothing holds them.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use trellis_core::{
//!     params::{CreateProject, TaskCreate},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some(dir.path().join("trellis.db")))
//!     .build()
//!     .await?;
//!
//! let project = planner
//!     .create_project(&CreateProject {
//!         name: "Office move".to_string(),
//!         description: None,
//!         start_date: date(2024, 1, 1),
//!         end_date: date(2024, 3, 31),
//!     })
//!     .await?;
//!
//! let task = planner
//!     .add_task(&TaskCreate {
//!         project_id: project.id,
//!         parent: None,
//!         kind: Some("milestone".to_string()),
//!         text: "Keys handed over".to_string(),
//!         description: None,
//!         start: date(2024, 3, 31),
//!         end: date(2024, 3, 31),
//!         percent: None,
//!         status: None,
//!         priority: None,
//!         assignee: None,
//!         cost: None,
//!         links: vec![],
//!     })
//!     .await?;
//! assert_eq!(task.cost, Some(0.0));
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::task;

use crate::{
    db::{Database, SqliteTaskStore},
    error::{Result, TrellisError},
    lifecycle::TaskCoordinator,
};

pub mod builder;
pub mod handlers;
pub mod project_ops;
pub mod task_ops;


pub use builder::PlannerBuilder;

type ProjectLocks = HashMap<u64, Arc<tokio::sync::Mutex<()>>>;

// An entry only the map references has no holder and no waiter.
fn prune_idle(locks: &mut ProjectLocks) {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
}

/// Main entry point for managing projects and their tasks.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    locks: Arc<Mutex<ProjectLocks>>,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Lock guarding mutations of one project's task collection.
    fn project_lock(&self, project_id: u64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        prune_idle(&mut locks);
        locks.entry(project_id).or_default().clone()
    }

    /// Drops lock entries that no caller holds or waits on.
    fn prune_locks(&self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        prune_idle(&mut locks);
    }

    /// Runs a read-only coordinator query on a blocking thread.
    async fn read_tasks<T, F>(&self, project_id: u64, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&TaskCoordinator<SqliteTaskStore<'_>>) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.read_tasks(project_id, query)
        })
        .await
        .map_err(TrellisError::join)?
    }

    /// Runs a coordinator operation on a blocking thread while holding the
    /// project's lock.
    async fn write_tasks<T, F>(&self, project_id: u64, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut TaskCoordinator<SqliteTaskStore<'_>>) -> Result<T> + Send + 'static,
    {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.write_tasks(project_id, operation)
        })
        .await
        .map_err(TrellisError::join)?
    }
}
