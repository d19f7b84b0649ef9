//! Display implementations for domain models.
//!
//! Output is markdown, rendered by the CLI's terminal renderer. Tasks show
//! their costs as stored on the value they are called on, so callers pass
//! tasks that already went through [`crate::cost::with_calculated_costs`]
//! when group costs should appear.

use std::fmt;

use super::{
    collections::Outline,
    datetime::{today, DateRange, LocalDateTime},
    format::{format_cost, task_progress, task_status},
};
use crate::{
    cost, hierarchy,
    models::{LinkType, Priority, Project, ProjectSummary, Task, TaskKind, TaskLink, TaskStatus},
};

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.kind)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.text, task_status(self, today()))?;
        writeln!(f)?;

        writeln!(f, "- Type: {}", self.kind)?;
        if let Some(parent) = self.parent {
            writeln!(f, "- Parent: {parent}")?;
        }
        writeln!(
            f,
            "- Dates: {} ({} days)",
            DateRange::new(&self.start, &self.end),
            self.duration_days()
        )?;
        writeln!(f, "- Progress: {}", task_progress(self))?;
        writeln!(f, "- Priority: {}", self.priority.label())?;
        if let Some(assignee) = &self.assignee {
            writeln!(f, "- Assignee: {assignee}")?;
        }
        if let Some(cost) = self.cost {
            writeln!(f, "- Cost: {}", format_cost(cost))?;
        }
        if !self.links.is_empty() {
            let links: Vec<String> = self.links.iter().map(ToString::to_string).collect();
            writeln!(f, "- Depends on: {}", links.join(", "))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Schedule: {}", DateRange::new(&self.start_date, &self.end_date))?;
        writeln!(f, "- Total cost: {}", format_cost(cost::total_cost(&self.tasks)))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.tasks.is_empty() {
            return writeln!(f, "\nNo tasks in this project.");
        }

        writeln!(f, "\n## Tasks")?;
        writeln!(f)?;
        write!(f, "{}", Outline(hierarchy::outline(&self.tasks)))
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.completed_tasks, self.total_tasks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(
            f,
            "- **Schedule**: {}",
            DateRange::new(&self.start_date, &self.end_date)
        )?;
        writeln!(f, "- **Total cost**: {}", format_cost(self.total_cost))?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}
