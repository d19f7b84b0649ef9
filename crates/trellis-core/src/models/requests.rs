//! Request types for creating and updating tasks.

use jiff::civil::Date;

use super::{Priority, TaskKind, TaskLink, TaskStatus};

/// Field values for a task that does not exist yet.
///
/// The id is assigned by the coordinator, so it is absent here.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use trellis_core::models::{NewTask, TaskKind};
///
/// let fields = NewTask::new("Design", date(2024, 2, 1), date(2024, 2, 20))
///     .with_parent(1)
///     .with_cost(120.0);
/// assert_eq!(fields.parent, Some(1));
/// assert_eq!(fields.kind, TaskKind::Task);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub parent: Option<u64>,
    pub kind: TaskKind,
    pub text: String,
    pub description: Option<String>,
    pub start: Date,
    pub end: Date,
    pub percent: f64,
    /// Explicit status; the percent-derived status wins on conflict
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub cost: Option<f64>,
    pub links: Vec<TaskLink>,
}

impl NewTask {
    /// Create a plain, top-level, not-started task.
    pub fn new(text: impl Into<String>, start: Date, end: Date) -> Self {
        Self {
            parent: None,
            kind: TaskKind::Task,
            text: text.into(),
            description: None,
            start,
            end,
            percent: 0.0,
            status: None,
            priority: Priority::default(),
            assignee: None,
            cost: None,
            links: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_links(mut self, links: Vec<TaskLink>) -> Self {
        self.links = links;
        self
    }
}

/// Partial update for an existing task.
///
/// `None` leaves a field untouched. Nullable fields use a nested `Option` so
/// that `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub parent: Option<Option<u64>>,
    pub kind: Option<TaskKind>,
    pub text: Option<String>,
    pub description: Option<Option<String>>,
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub percent: Option<f64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<String>>,
    pub cost: Option<Option<f64>>,
    pub links: Option<Vec<TaskLink>>,
}

impl TaskChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Human-readable names of the fields this change set touches.
    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        let mut push = |touched: bool, name: &str| {
            if touched {
                fields.push(name.to_string());
            }
        };
        push(self.parent.is_some(), "parent");
        push(self.kind.is_some(), "type");
        push(self.text.is_some(), "text");
        push(self.description.is_some(), "description");
        push(self.start.is_some(), "start");
        push(self.end.is_some(), "end");
        push(self.percent.is_some(), "percent");
        push(self.status.is_some(), "status");
        push(self.priority.is_some(), "priority");
        push(self.assignee.is_some(), "assignee");
        push(self.cost.is_some(), "cost");
        push(self.links.is_some(), "links");
        fields
    }
}

impl TryFrom<crate::params::TaskCreate> for NewTask {
    type Error = crate::TrellisError;

    /// Convert interface parameters into validated creation fields.
    ///
    /// Enum-valued strings are parsed here; structural invariants are
    /// checked later by the coordinator.
    fn try_from(params: crate::params::TaskCreate) -> Result<Self, Self::Error> {
        let (kind, status, priority) = params.validate()?;

        Ok(Self {
            parent: params.parent,
            kind: kind.unwrap_or_default(),
            text: params.text,
            description: params.description,
            start: params.start,
            end: params.end,
            percent: params.percent.unwrap_or(0.0),
            status,
            priority: priority.unwrap_or_default(),
            assignee: params.assignee,
            cost: params.cost,
            links: params.links,
        })
    }
}

impl TryFrom<crate::params::UpdateTask> for TaskChanges {
    type Error = crate::TrellisError;

    fn try_from(params: crate::params::UpdateTask) -> Result<Self, Self::Error> {
        let (kind, status, priority) = params.validate()?;

        let parent = if params.detach {
            Some(None)
        } else {
            params.parent.map(Some)
        };

        Ok(Self {
            parent,
            kind,
            text: params.text,
            description: params.description.map(Some),
            start: params.start,
            end: params.end,
            percent: params.percent,
            status,
            priority,
            assignee: params.assignee.map(Some),
            cost: params.cost.map(Some),
            links: params.links,
        })
    }
}
