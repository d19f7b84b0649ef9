//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use super::{
    datetime::{today, DateRange},
    format::{format_cost, task_progress, task_status},
};
use crate::{hierarchy::OutlineEntry, models::ProjectSummary};

/// Newtype wrapper for displaying collections of project summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use trellis_core::{display::ProjectSummaries, models::ProjectSummary};
///
/// let summary = ProjectSummary {
///     id: 1,
///     name: "Office move".to_string(),
///     description: None,
///     start_date: date(2024, 1, 1),
///     end_date: date(2024, 3, 31),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     total_tasks: 4,
///     completed_tasks: 1,
///     total_cost: 195.0,
/// };
///
/// let output = ProjectSummaries(vec![summary]).to_string();
/// assert!(output.contains("Office move (ID: 1) (1/4)"));
/// ```
pub struct ProjectSummaries(pub Vec<ProjectSummary>);

impl ProjectSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ProjectSummaries {
    type Output = ProjectSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ProjectSummaries {
    type Item = ProjectSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ProjectSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No projects found.")
        } else {
            for project in &self.0 {
                write!(f, "{project}")?;
            }
            Ok(())
        }
    }
}

/// Compact one-line-per-task listing with outline numbers, used for parent
/// and dependency pickers.
pub struct Tasks(pub Vec<OutlineEntry>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No eligible tasks.");
        }
        for entry in &self.0 {
            let task = &entry.task;
            writeln!(
                f,
                "- **{}** {} ({}, ID: {})",
                entry.number, task.text, task.kind, task.id
            )?;
        }
        Ok(())
    }
}

/// Numbered task tree rendered as a markdown table.
///
/// Rows appear in collection order, which keeps every subtree directly below
/// its group.
pub struct Outline(pub Vec<OutlineEntry>);

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks in this project.");
        }

        let today = today();
        writeln!(f, "| No. | ID | Task | Status | Dates | Progress | Cost |")?;
        writeln!(f, "|:-|-:|:-|:-|:-|-:|-:|")?;
        for entry in &self.0 {
            let task = &entry.task;
            let name = if task.is_group() {
                format!("**{}**", task.text)
            } else if task.is_milestone() {
                format!("◆ {}", task.text)
            } else {
                task.text.clone()
            };
            let cost = task.cost.map_or_else(|| "-".to_string(), format_cost);

            writeln!(
                f,
                "| {} | {} | {}{} | {} | {} | {} | {} |",
                entry.number,
                task.id,
                "› ".repeat(entry.depth),
                name,
                task_status(task, today),
                DateRange::new(&task.start, &task.end),
                task_progress(task),
                cost
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        cost::with_calculated_costs,
        hierarchy::outline,
        models::TaskStatus,
        testing::{group, milestone, planning_phase, task},
    };

    #[test]
    fn test_outline_rows_follow_collection_order() {
        let mut tasks = planning_phase();
        tasks.push(milestone(13, Some(1)));
        let rendered = Outline(outline(&with_calculated_costs(&tasks))).to_string();

        let rows: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with("| 1 | 1 | **Task 1**"));
        assert!(rows[0].ends_with("| 195 |"));
        assert!(rows[3].starts_with("| 1.2.1 | 121 | › › Task 121"));
        assert!(rows[4].contains("◆ Task 13"));
        assert!(rows[4].ends_with("| 0 |"));
    }

    #[test]
    fn test_outline_marks_overdue_and_milestone_progress() {
        let mut gate = milestone(2, None);
        gate.percent = 1.0;
        let mut upcoming = task(3, None);
        upcoming.start = date(2999, 1, 1);
        upcoming.end = date(2999, 1, 31);
        let mut done = task(4, None);
        done.status = TaskStatus::Completed;

        let rendered = Outline(outline(&[task(1, None), gate, upcoming, done])).to_string();
        let rows: Vec<&str> = rendered.lines().skip(2).collect();

        assert!(rows[0].contains("| ○ Pending ⚠ Overdue |"));
        assert!(rows[1].contains("| 0% |"));
        assert!(rows[2].contains("| ○ Pending |"));
        assert!(!rows[3].contains("Overdue"));
    }

    #[test]
    fn test_outline_shows_dash_for_missing_cost() {
        let rendered = Outline(outline(&[task(1, None)])).to_string();
        assert!(rendered.lines().nth(2).is_some_and(|row| row.ends_with("| - |")));
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Outline(vec![]).to_string(), "No tasks in this project.\n");
        assert_eq!(Tasks(vec![]).to_string(), "No eligible tasks.\n");
        assert_eq!(ProjectSummaries(vec![]).to_string(), "No projects found.\n");
    }

    #[test]
    fn test_tasks_listing_shows_numbers_and_ids() {
        let output = Tasks(outline(&[group(1, None), task(11, Some(1)), task(2, None)])).to_string();
        assert_eq!(
            output,
            "- **1** Task 1 (group, ID: 1)\n- **1.1** Task 11 (task, ID: 11)\n- **2** Task 2 (task, ID: 2)\n"
        );
    }
}
