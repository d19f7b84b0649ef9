//! Closed enumerations for task kind, status, priority and link type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a task within the hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Plain unit of work with an authoritative cost
    #[default]
    Task,

    /// Container whose cost is rolled up from its descendants
    Group,

    /// Zero-cost checkpoint
    Milestone,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(TaskKind::Task),
            "group" => Ok(TaskKind::Group),
            "milestone" => Ok(TaskKind::Milestone),
            _ => Err(format!("Invalid task type: {s}")),
        }
    }
}

impl TaskKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Task => "task",
            TaskKind::Group => "group",
            TaskKind::Milestone => "milestone",
        }
    }
}

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started
    #[default]
    Pending,

    /// Work is partially done
    InProgress,

    /// Work is finished
    Completed,

    /// Work cannot proceed
    Blocked,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trellis_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// assert_eq!(TaskStatus::Blocked.with_icon(), "✗ Blocked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Pending => "○ Pending",
            TaskStatus::Blocked => "✗ Blocked",
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

/// Dependency relationship between two tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LinkType {
    /// Target starts after this task finishes
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,

    /// Target finishes after this task finishes
    #[serde(rename = "FF")]
    FinishToFinish,

    /// Target starts after this task starts
    #[serde(rename = "SS")]
    StartToStart,

    /// Target finishes after this task starts
    #[serde(rename = "SF")]
    StartToFinish,
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FS" => Ok(LinkType::FinishToStart),
            "FF" => Ok(LinkType::FinishToFinish),
            "SS" => Ok(LinkType::StartToStart),
            "SF" => Ok(LinkType::StartToFinish),
            _ => Err(format!("Invalid link type: {s}")),
        }
    }
}

impl LinkType {
    /// Short code used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::FinishToStart => "FS",
            LinkType::FinishToFinish => "FF",
            LinkType::StartToStart => "SS",
            LinkType::StartToFinish => "SF",
        }
    }
}
