mod common;

use common::{create_test_planner, task_params};
use jiff::civil::date;
use trellis_core::{
    params::{CreateProject, Eligibility, Id, TaskCreate, TaskRef, UpdateProject, UpdateTask},
    LinkType, TaskKind, TaskLink, TaskStatus, TrellisError,
};

async fn website(planner: &trellis_core::Planner) -> u64 {
    planner
        .create_project(&CreateProject {
            name: "Website Redesign".to_string(),
            description: Some("Q1 relaunch".to_string()),
            start_date: date(2024, 1, 15),
            end_date: date(2024, 4, 30),
        })
        .await
        .expect("Failed to create project")
        .id
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_project_workflow() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;

    let planning = planner
        .add_task(&TaskCreate {
            kind: Some("group".to_string()),
            ..task_params(project_id, "Planning")
        })
        .await
        .expect("Failed to add group");
    let requirements = planner
        .add_task(&TaskCreate {
            parent: Some(planning.id),
            cost: Some(75.0),
            ..task_params(project_id, "Requirements")
        })
        .await
        .expect("Failed to add task");
    let signoff = planner
        .add_task(&TaskCreate {
            parent: Some(planning.id),
            kind: Some("milestone".to_string()),
            links: vec![TaskLink::new(requirements.id, LinkType::FinishToStart)],
            ..task_params(project_id, "Sign-off")
        })
        .await
        .expect("Failed to add milestone");
    let build = planner
        .add_task(&TaskCreate {
            cost: Some(300.0),
            ..task_params(project_id, "Build")
        })
        .await
        .expect("Failed to add task");

    // Children land directly after their parent's subtree
    let outline = planner.outline(&Id { id: project_id }).await.unwrap();
    let rows: Vec<(&str, u64)> = outline
        .iter()
        .map(|e| (e.number.as_str(), e.task.id))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("1", planning.id),
            ("1.1", requirements.id),
            ("1.2", signoff.id),
            ("2", build.id),
        ]
    );
    assert_eq!(signoff.cost, Some(0.0));

    let project = planner
        .get_project(&Id { id: project_id })
        .await
        .unwrap()
        .expect("Project should exist");
    assert_eq!(project.tasks[0].cost, Some(75.0));

    // Completing a task through percent alone
    let done = planner
        .update_task(&UpdateTask {
            project_id,
            id: requirements.id,
            percent: Some(1.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(done.status, TaskStatus::Completed);

    // Reparent Build under Planning
    let moved = planner
        .update_task(&UpdateTask {
            project_id,
            id: build.id,
            parent: Some(planning.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(moved.parent, Some(planning.id));

    let group = planner
        .get_task(&TaskRef {
            project_id,
            id: planning.id,
        })
        .await
        .unwrap();
    assert_eq!(group.cost, Some(375.0));

    // Removing Requirements drops the link pointing at it
    let removed = planner
        .remove_task(&TaskRef {
            project_id,
            id: requirements.id,
        })
        .await
        .unwrap();
    assert_eq!(removed, vec![requirements.id]);

    let signoff = planner
        .get_task(&TaskRef {
            project_id,
            id: signoff.id,
        })
        .await
        .unwrap();
    assert!(signoff.links.is_empty());

    let summaries = planner.list_projects().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_tasks, 3);
    assert_eq!(summaries[0].total_cost, 300.0);
}

#[tokio::test]
async fn test_cycles_are_rejected_and_nothing_changes() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;

    let outer = planner
        .add_task(&TaskCreate {
            kind: Some("group".to_string()),
            ..task_params(project_id, "Outer")
        })
        .await
        .unwrap();
    let inner = planner
        .add_task(&TaskCreate {
            parent: Some(outer.id),
            kind: Some("group".to_string()),
            ..task_params(project_id, "Inner")
        })
        .await
        .unwrap();

    let result = planner
        .update_task(&UpdateTask {
            project_id,
            id: outer.id,
            parent: Some(inner.id),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(TrellisError::Cycle { .. })));

    let first = planner.add_task(&task_params(project_id, "First")).await.unwrap();
    let second = planner
        .add_task(&TaskCreate {
            links: vec![TaskLink::new(first.id, LinkType::FinishToStart)],
            ..task_params(project_id, "Second")
        })
        .await
        .unwrap();

    let result = planner
        .update_task(&UpdateTask {
            project_id,
            id: first.id,
            links: Some(vec![TaskLink::new(second.id, LinkType::StartToStart)]),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(TrellisError::Cycle { .. })));

    let outer = planner
        .get_task(&TaskRef {
            project_id,
            id: outer.id,
        })
        .await
        .unwrap();
    assert_eq!(outer.parent, None);
}

#[tokio::test]
async fn test_task_ids_are_scoped_per_project() {
    let (_temp_dir, planner) = create_test_planner().await;
    let first_project = website(&planner).await;
    let second_project = website(&planner).await;

    let a = planner.add_task(&task_params(first_project, "A")).await.unwrap();
    let b = planner.add_task(&task_params(second_project, "B")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 1);

    planner
        .remove_task(&TaskRef {
            project_id: first_project,
            id: a.id,
        })
        .await
        .unwrap();

    // Ids are never reused, even after a delete
    let c = planner.add_task(&task_params(first_project, "C")).await.unwrap();
    assert_eq!(c.id, 2);

    let remaining = planner.get_tasks(&Id { id: second_project }).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "B");
}

#[tokio::test]
async fn test_eligible_parents_exclude_own_subtree() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;

    let phase = planner
        .add_task(&TaskCreate {
            kind: Some("group".to_string()),
            ..task_params(project_id, "Phase")
        })
        .await
        .unwrap();
    let nested = planner
        .add_task(&TaskCreate {
            parent: Some(phase.id),
            kind: Some("group".to_string()),
            ..task_params(project_id, "Nested")
        })
        .await
        .unwrap();
    let other = planner
        .add_task(&TaskCreate {
            kind: Some("group".to_string()),
            ..task_params(project_id, "Other")
        })
        .await
        .unwrap();

    let parents = planner
        .eligible_parents(&Eligibility {
            project_id,
            id: Some(phase.id),
        })
        .await
        .unwrap();
    let ids: Vec<u64> = parents.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![other.id]);
    assert!(!ids.contains(&nested.id));

    let unknown = planner
        .eligible_parents(&Eligibility {
            project_id,
            id: Some(999),
        })
        .await;
    assert!(matches!(unknown, Err(TrellisError::TaskNotFound { id: 999 })));
}

#[tokio::test]
async fn test_invalid_fields_are_rejected() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;

    let backwards = planner
        .add_task(&TaskCreate {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
            ..task_params(project_id, "Backwards")
        })
        .await;
    assert!(matches!(backwards, Err(TrellisError::Validation { .. })));

    let overdone = planner
        .add_task(&TaskCreate {
            percent: Some(1.5),
            ..task_params(project_id, "Overdone")
        })
        .await;
    assert!(matches!(overdone, Err(TrellisError::Validation { .. })));

    let dangling = planner
        .add_task(&TaskCreate {
            links: vec![TaskLink::new(77, LinkType::FinishToStart)],
            ..task_params(project_id, "Dangling")
        })
        .await;
    assert!(dangling.is_err());

    let tasks = planner.get_tasks(&Id { id: project_id }).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_group_keeps_kind_and_rolls_up() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;

    let group = planner
        .add_task(&TaskCreate {
            kind: Some("group".to_string()),
            cost: Some(999.0),
            ..task_params(project_id, "Group")
        })
        .await
        .unwrap();
    assert_eq!(group.kind, TaskKind::Group);
    assert_eq!(group.cost, None);

    planner
        .add_task(&TaskCreate {
            parent: Some(group.id),
            cost: Some(12.5),
            ..task_params(project_id, "Leaf")
        })
        .await
        .unwrap();

    let group = planner
        .get_task(&TaskRef {
            project_id,
            id: group.id,
        })
        .await
        .unwrap();
    assert_eq!(group.cost, Some(12.5));
}

#[tokio::test]
async fn test_project_update_keeps_tasks_and_checks_dates() {
    let (_temp_dir, planner) = create_test_planner().await;
    let project_id = website(&planner).await;
    planner
        .add_task(&task_params(project_id, "Kickoff"))
        .await
        .unwrap();

    let updated = planner
        .update_project(&UpdateProject {
            id: project_id,
            name: Some("Website Relaunch".to_string()),
            description: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Website Relaunch");
    assert_eq!(updated.description, None);
    assert_eq!(updated.start_date, date(2024, 1, 15));

    let inverted = planner
        .update_project(&UpdateProject {
            id: project_id,
            end_date: Some(date(2024, 1, 1)),
            ..Default::default()
        })
        .await;
    assert!(matches!(inverted, Err(TrellisError::Validation { .. })));

    let stored = planner
        .get_project(&Id { id: project_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Website Relaunch");
    assert_eq!(stored.end_date, date(2024, 4, 30));
    assert_eq!(stored.tasks.len(), 1);

    let summaries = planner.list_projects().await.unwrap();
    assert_eq!(summaries[0].name, "Website Relaunch");
}
