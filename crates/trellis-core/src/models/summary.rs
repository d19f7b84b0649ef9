//! Project summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Summary information about a project with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project ID
    pub id: u64,
    /// Name of the project
    pub name: String,
    /// Detailed multi-line description of the project
    pub description: Option<String>,
    /// Planned start
    pub start_date: Date,
    /// Planned end
    pub end_date: Date,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of tasks (groups and milestones included)
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Sum of all leaf task costs
    pub total_cost: f64,
}
