//! Task model definition and related functionality.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{LinkType, Priority, TaskKind, TaskStatus};

/// A node in a project's task forest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Identifier, unique within the project and never reused
    pub id: u64,

    /// Containing group, `None` for top-level tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,

    /// Task, group or milestone
    #[serde(rename = "type", default)]
    pub kind: TaskKind,

    /// Display name
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub start: Date,

    pub end: Date,

    /// Completion fraction in `[0, 1]`
    #[serde(default)]
    pub percent: f64,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Authoritative for plain tasks; derived for groups, zero for milestones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    /// Ordered dependency links to other tasks in the same project
    #[serde(default)]
    pub links: Vec<TaskLink>,
}

/// Typed dependency link from one task to another.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskLink {
    /// ID of the target task
    pub target: u64,

    /// Dependency relationship
    #[serde(rename = "type")]
    pub kind: LinkType,
}

impl TaskLink {
    pub fn new(target: u64, kind: LinkType) -> Self {
        Self { target, kind }
    }
}

impl FromStr for TaskLink {
    type Err = String;

    /// Parses `TARGET[:TYPE]`, e.g. `12:FS` or `12` (finish-to-start).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, kind) = match s.split_once(':') {
            Some((target, kind)) => (target, kind.parse::<LinkType>()?),
            None => (s, LinkType::default()),
        };
        let target = target
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("Invalid link target: {target}"))?;
        Ok(Self { target, kind })
    }
}

impl Task {
    pub fn is_group(&self) -> bool {
        self.kind == TaskKind::Group
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }

    /// Cost this task contributes to an enclosing group when it is a leaf.
    ///
    /// Groups contribute through their own children instead, so they report
    /// zero here.
    pub fn leaf_cost(&self) -> f64 {
        match self.kind {
            TaskKind::Task => self.cost.unwrap_or(0.0),
            TaskKind::Group | TaskKind::Milestone => 0.0,
        }
    }

    /// Applies the kind-specific field constraints: group cost is never
    /// stored, milestone cost is always zero.
    pub fn normalize(&mut self) {
        match self.kind {
            TaskKind::Group => self.cost = None,
            TaskKind::Milestone => self.cost = Some(0.0),
            TaskKind::Task => {}
        }
    }

    /// Whole days between start and end.
    pub fn duration_days(&self) -> i32 {
        (self.end - self.start).get_days()
    }

    /// True when the task should have finished before `today` but is not
    /// completed.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status != TaskStatus::Completed && self.end < today
    }
}
