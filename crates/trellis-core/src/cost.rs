//! Rollup of group costs from descendant leaves.
//!
//! A group's cost is never authoritative. It is recomputed on every read as
//! the sum of its children, recursing through nested groups; plain tasks
//! contribute their stored cost and milestones contribute zero.

use log::error;

use crate::{
    hierarchy::{self, MAX_DEPTH},
    models::Task,
};

/// Rolled-up cost of a group.
///
/// A group without children costs 0. The id does not have to name a group;
/// the sum is taken over whatever tasks list it as their parent.
pub fn group_cost(group_id: u64, tasks: &[Task]) -> f64 {
    cost_at(group_id, tasks, 0)
}

fn cost_at(group_id: u64, tasks: &[Task], level: usize) -> f64 {
    if level > MAX_DEPTH {
        error!("Group {group_id} is nested deeper than {MAX_DEPTH} levels; cost rollup truncated");
        return 0.0;
    }
    hierarchy::children(group_id, tasks)
        .into_iter()
        .map(|child| {
            if child.is_group() {
                cost_at(child.id, tasks, level + 1)
            } else {
                child.leaf_cost()
            }
        })
        .sum()
}

/// Copy of `tasks` with every group's `cost` replaced by its rollup.
///
/// Non-group tasks pass through unchanged. Applying this twice yields the
/// same costs as applying it once, since rollups only read leaf costs.
pub fn with_calculated_costs(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            let mut task = task.clone();
            if task.is_group() {
                task.cost = Some(group_cost(task.id, tasks));
            }
            task
        })
        .collect()
}

/// Sum of every leaf cost in the collection.
pub fn total_cost(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .filter(|task| !task.is_group())
        .map(Task::leaf_cost)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{costed, group, milestone, planning_phase};

    #[test]
    fn test_group_cost_rolls_up_nested_groups() {
        let tasks = vec![
            group(1, None),
            costed(2, Some(1), 10.0),
            costed(3, Some(1), 20.0),
            group(4, Some(1)),
            costed(5, Some(4), 5.0),
        ];

        assert_eq!(group_cost(1, &tasks), 35.0);
        assert_eq!(group_cost(4, &tasks), 5.0);
    }

    #[test]
    fn test_planning_phase_rollup() {
        let tasks = planning_phase();
        assert_eq!(group_cost(1, &tasks), 195.0);
        assert_eq!(group_cost(12, &tasks), 120.0);
    }

    #[test]
    fn test_empty_group_costs_nothing() {
        let tasks = vec![group(1, None)];
        assert_eq!(group_cost(1, &tasks), 0.0);
    }

    #[test]
    fn test_group_chain_rolls_up_through_every_level() {
        let tasks = vec![
            group(1, None),
            group(2, Some(1)),
            group(3, Some(2)),
            costed(4, Some(3), 42.0),
        ];
        assert_eq!(group_cost(1, &tasks), 42.0);
    }

    #[test]
    fn test_milestones_and_missing_costs_contribute_zero() {
        let mut stray = milestone(3, Some(1));
        stray.cost = Some(999.0);
        let tasks = vec![
            group(1, None),
            crate::testing::task(2, Some(1)),
            stray,
            costed(4, Some(1), 8.0),
        ];
        assert_eq!(group_cost(1, &tasks), 8.0);
    }

    #[test]
    fn test_stale_group_cost_is_ignored() {
        let mut tasks = planning_phase();
        tasks[2].cost = Some(1_000_000.0);
        assert_eq!(group_cost(1, &tasks), 195.0);
    }

    #[test]
    fn test_with_calculated_costs_overwrites_groups_only() {
        let tasks = planning_phase();
        let costed_tasks = with_calculated_costs(&tasks);

        assert_eq!(costed_tasks[0].cost, Some(195.0));
        assert_eq!(costed_tasks[1], tasks[1]);
        assert_eq!(costed_tasks[2].cost, Some(120.0));
        assert_eq!(costed_tasks[3], tasks[3]);
        assert_eq!(tasks[0].cost, None, "input must not be mutated");
    }

    #[test]
    fn test_with_calculated_costs_is_idempotent() {
        let once = with_calculated_costs(&planning_phase());
        let twice = with_calculated_costs(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_total_cost_sums_leaves() {
        let mut tasks = planning_phase();
        tasks.push(milestone(13, Some(1)));
        assert_eq!(total_cost(&tasks), 195.0);
        assert_eq!(total_cost(&with_calculated_costs(&tasks)), 195.0);
    }
}
