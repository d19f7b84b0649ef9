//! Core library for the Trellis task-hierarchy engine.
//!
//! A project owns one ordered forest of tasks. Groups contain tasks, costs
//! roll up from leaves to their groups, and every task gets a dotted outline
//! number derived from its position in the forest. Tasks can also depend on
//! each other through typed links.
//!
//! # Layers
//!
//! - [`hierarchy`], [`cost`], [`dependency`]: pure functions over a task
//!   slice (numbering, rollup, cycle checks)
//! - [`lifecycle`]: the [`lifecycle::TaskCoordinator`], sole writer of a
//!   [`store::TaskStore`], enforcing every invariant on create, update and
//!   delete
//! - [`store`] and [`db`]: in-memory and SQLite task stores
//! - [`planner`]: async facade used by interface layers
//! - [`display`]: markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use trellis_core::{
//!     cost,
//!     lifecycle::TaskCoordinator,
//!     models::{NewTask, TaskKind},
//!     store::MemoryStore,
//! };
//!
//! let mut coordinator = TaskCoordinator::new(MemoryStore::new());
//! let (start, end) = (date(2024, 1, 15), date(2024, 2, 28));
//!
//! let planning = coordinator.create(NewTask::new("Planning", start, end).with_kind(TaskKind::Group))?;
//! coordinator.create(NewTask::new("Requirements", start, end).with_parent(planning.id).with_cost(75.0))?;
//! let design = coordinator.create(
//!     NewTask::new("Design", start, end).with_parent(planning.id).with_kind(TaskKind::Group),
//! )?;
//! coordinator.create(NewTask::new("Mockups", start, end).with_parent(design.id).with_cost(120.0))?;
//!
//! let tasks = coordinator.tasks()?;
//! assert_eq!(cost::group_cost(planning.id, &tasks), 195.0);
//!
//! let outline = coordinator.outline()?;
//! assert_eq!(outline[3].number, "1.2.1");
//! # Ok::<(), trellis_core::TrellisError>(())
//! ```

pub mod cost;
pub mod db;
pub mod dependency;
pub mod display;
pub mod error;
pub mod hierarchy;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, Outline, ProjectSummaries, Tasks, UpdateResult,
};
pub use error::{Relation, Result, TrellisError};
pub use hierarchy::OutlineEntry;
pub use lifecycle::TaskCoordinator;
pub use models::{
    LinkType, NewTask, Priority, Project, ProjectSummary, Task, TaskChanges, TaskKind, TaskLink,
    TaskStatus,
};
pub use params::{
    CreateProject, DeleteProject, Eligibility, Id, TaskCreate, TaskRef, UpdateProject, UpdateTask,
};
pub use planner::{Planner, PlannerBuilder};
pub use store::{MemoryStore, TaskStore};
