//! Data models for projects and tasks.
//!
//! This module contains the core domain models of the task-hierarchy engine.
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! A [`Task`] is a closed variant over [`TaskKind`]:
//!
//! - **Task**: plain unit of work; its `cost` is authoritative
//! - **Group**: container; its `cost` is never stored and is always rolled up
//!   from descendant leaves by [`crate::cost`]
//! - **Milestone**: checkpoint; its `cost` is always zero
//!
//! [`Task::normalize`] enforces these constraints and is applied on every
//! write by the lifecycle coordinator.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use trellis_core::models::{Priority, Task, TaskKind, TaskStatus};
//!
//! let mut task = Task {
//!     id: 14,
//!     parent: Some(1),
//!     kind: TaskKind::Milestone,
//!     text: "Planning complete".to_string(),
//!     description: None,
//!     start: date(2024, 2, 28),
//!     end: date(2024, 2, 28),
//!     percent: 0.0,
//!     status: TaskStatus::Pending,
//!     priority: Priority::High,
//!     assignee: None,
//!     cost: Some(500.0),
//!     links: vec![],
//! };
//! task.normalize();
//! assert_eq!(task.cost, Some(0.0));
//! ```

pub mod project;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;


pub use project::Project;
pub use requests::{NewTask, TaskChanges};
pub use status::{LinkType, Priority, TaskKind, TaskStatus};
pub use summary::ProjectSummary;
pub use task::{Task, TaskLink};
