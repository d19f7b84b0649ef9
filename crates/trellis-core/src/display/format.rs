//! Number formatting for percentages and costs.

use jiff::civil::Date;

use crate::models::Task;

const OVERDUE_MARKER: &str = "⚠ Overdue";

/// Renders a completion fraction as a whole percentage, e.g. `0.25` as `25%`.
///
/// ```rust
/// use trellis_core::display::format_percent;
///
/// assert_eq!(format_percent(0.25), "25%");
/// assert_eq!(format_percent(0.999), "100%");
/// ```
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Progress shown for a task; milestones always read `0%`.
pub(crate) fn task_progress(task: &Task) -> String {
    if task.is_milestone() {
        format_percent(0.0)
    } else {
        format_percent(task.percent)
    }
}

/// Status label with icon, followed by an overdue marker when the task
/// should have finished before `today`.
pub(crate) fn task_status(task: &Task, today: Date) -> String {
    if task.is_overdue(today) {
        format!("{} {OVERDUE_MARKER}", task.status.with_icon())
    } else {
        task.status.with_icon().to_string()
    }
}

/// Renders a cost rounded to whole units with thousands separators.
///
/// ```rust
/// use trellis_core::display::format_cost;
///
/// assert_eq!(format_cost(1234567.4), "1,234,567");
/// assert_eq!(format_cost(75.0), "75");
/// ```
pub fn format_cost(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
