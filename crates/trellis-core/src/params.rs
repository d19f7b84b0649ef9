//! Parameter structures for trellis operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, future service layers) without framework-specific
//! derives. Interface layers wrap or convert into these types; the core then
//! validates them into [`crate::models::NewTask`] and
//! [`crate::models::TaskChanges`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │ Core Requests   │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (typed enums)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Enum-valued fields (`kind`, `status`, `priority`) travel as strings so that
//! every interface reports invalid values the same way.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrellisError},
    models::{Priority, TaskKind, TaskLink, TaskStatus},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Identifies a task inside a project.
///
/// Task ids are only unique within their project.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TaskRef {
    pub project_id: u64,
    pub id: u64,
}

/// Asks which tasks may become the parent or dependency target of a task.
///
/// `id` is `None` for a task that has not been created yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Eligibility {
    pub project_id: u64,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Name of the project (required)
    pub name: String,
    /// Optional detailed description of the project
    pub description: Option<String>,
    /// Planned start date
    pub start_date: Date,
    /// Planned end date, not before the start date
    pub end_date: Date,
}

impl CreateProject {
    /// Validate the project parameters.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TrellisError::validation("name").with_reason("Project name is required"));
        }
        check_project_dates(self.start_date, self.end_date)
    }
}

/// Parameters for updating a project's details.
///
/// Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// The ID of the project to update
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdateProject {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Names of the fields this update supplies.
    pub fn changed_fields(&self) -> Vec<String> {
        [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("start_date", self.start_date.is_some()),
            ("end_date", self.end_date.is_some()),
        ]
        .into_iter()
        .filter(|(_, touched)| *touched)
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Validate the fields that can be checked without the stored project.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - No field supplied, an empty name, or
    ///   both dates supplied with the end before the start
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(TrellisError::validation("changes")
                .with_reason("At least one project field must be provided"));
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(TrellisError::validation("name").with_reason("Project name is required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            check_project_dates(start, end)?;
        }
        Ok(())
    }
}

/// Rejects a project whose end date precedes its start date.
pub(crate) fn check_project_dates(start: Date, end: Date) -> Result<()> {
    if end < start {
        return Err(TrellisError::validation("end_date")
            .with_reason("End date must be after or equal to start date"));
    }
    Ok(())
}

/// Parameters for deleting a project together with all of its tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteProject {
    /// The ID of the project to delete
    pub id: u64,
    /// Explicit confirmation, required to prevent accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for creating a task in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    /// ID of the project to add the task to
    pub project_id: u64,
    /// Optional parent group
    pub parent: Option<u64>,
    /// 'task' (default), 'group' or 'milestone'
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Display text (required)
    pub text: String,
    pub description: Option<String>,
    pub start: Date,
    pub end: Date,
    /// Completion fraction in [0, 1], defaults to 0
    pub percent: Option<f64>,
    /// 'pending', 'in-progress', 'completed' or 'blocked'
    pub status: Option<String>,
    /// 'low', 'medium' (default), 'high' or 'critical'
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub cost: Option<f64>,
    /// Dependency links
    #[serde(default)]
    pub links: Vec<TaskLink>,
}

/// Parameters for updating an existing task.
///
/// Allows partial updates; omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Project the task belongs to
    pub project_id: u64,
    /// Task ID to update (required)
    pub id: u64,
    /// New parent group
    pub parent: Option<u64>,
    /// Move the task to the top level; wins over `parent`
    #[serde(default)]
    pub detach: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<String>,
    pub description: Option<String>,
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub percent: Option<f64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub cost: Option<f64>,
    /// Replacement link list
    pub links: Option<Vec<TaskLink>>,
}

type ParsedEnums = (Option<TaskKind>, Option<TaskStatus>, Option<Priority>);

fn parse_field<T: FromStr>(field: &str, value: Option<&str>, allowed: &str) -> Result<Option<T>> {
    value
        .map(|raw| {
            T::from_str(raw).map_err(|_| {
                TrellisError::validation(field)
                    .with_reason(format!("Invalid {field}: {raw}. Must be one of {allowed}"))
            })
        })
        .transpose()
}

fn parse_enums(kind: Option<&str>, status: Option<&str>, priority: Option<&str>) -> Result<ParsedEnums> {
    Ok((
        parse_field("type", kind, "'task', 'group' or 'milestone'")?,
        parse_field(
            "status",
            status,
            "'pending', 'in-progress', 'completed' or 'blocked'",
        )?,
        parse_field("priority", priority, "'low', 'medium', 'high' or 'critical'")?,
    ))
}

impl TaskCreate {
    /// Parse the string-typed enum fields.
    ///
    /// # Errors
    ///
    /// * `TrellisError::Validation` - When type, status or priority is not a
    ///   recognised value
    pub fn validate(&self) -> Result<ParsedEnums> {
        parse_enums(
            self.kind.as_deref(),
            self.status.as_deref(),
            self.priority.as_deref(),
        )
    }
}

impl UpdateTask {
    /// Parse the string-typed enum fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trellis_core::{models::TaskStatus, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     project_id: 1,
    ///     id: 11,
    ///     status: Some("in-progress".to_string()),
    ///     ..Default::default()
    /// };
    /// let (_, status, _) = params.validate()?;
    /// assert_eq!(status, Some(TaskStatus::InProgress));
    /// # use trellis_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<ParsedEnums> {
        parse_enums(
            self.kind.as_deref(),
            self.status.as_deref(),
            self.priority.as_deref(),
        )
    }
}
