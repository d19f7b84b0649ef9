//! Project model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Task;

/// A project owning one ordered task forest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique identifier for the project
    pub id: u64,

    /// Name of the project
    pub name: String,

    /// Detailed multi-line description of the project
    pub description: Option<String>,

    /// Planned start of the project
    pub start_date: Date,

    /// Planned end of the project
    pub end_date: Date,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the project or any of its tasks was last modified (UTC)
    pub updated_at: Timestamp,

    /// Tasks in collection order with group costs calculated
    #[serde(default)]
    pub tasks: Vec<Task>,
}
