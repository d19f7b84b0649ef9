//! Markdown formatting for projects, tasks and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "created" headers, numbered tree
//! tables and empty-collection messages. The CLI renders the resulting
//! markdown through its terminal renderer.
//!
//! - [`collections`]: `ProjectSummaries`, `Tasks`, `Outline`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp and date-range formatting
//! - [`format`]: percent and cost formatting
//!
//! ```rust
//! use trellis_core::display::OperationStatus;
//!
//! let status = OperationStatus::skipped("Task 404 does not exist");
//! assert_eq!(status.to_string(), "Nothing to do: Task 404 does not exist\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod format;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Outline, ProjectSummaries, Tasks};
pub use datetime::{DateRange, LocalDateTime, ShortDate};
pub use format::{format_cost, format_percent};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::{OperationStatus, Outcome};
