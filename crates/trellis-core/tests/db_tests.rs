use jiff::civil::date;
use tempfile::NamedTempFile;
use trellis_core::{
    models::{NewTask, TaskKind},
    Database, TrellisError,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn fields(text: &str) -> NewTask {
    NewTask::new(text, date(2024, 3, 1), date(2024, 3, 8))
}

#[test]
fn test_tasks_survive_reopen() {
    let (temp_file, mut db) = create_test_db();
    let project = db
        .create_project("Persistent", None, date(2024, 3, 1), date(2024, 3, 31))
        .expect("Failed to create project");

    db.write_tasks(project.id, |coordinator| {
        let group = coordinator.create(fields("Group").with_kind(TaskKind::Group))?;
        coordinator.create(fields("Leaf").with_parent(group.id).with_cost(42.0))?;
        coordinator.create(fields("Top"))?;
        Ok(())
    })
    .expect("Failed to write tasks");
    drop(db);

    let mut db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let loaded = db
        .get_project(project.id)
        .expect("Failed to get project")
        .expect("Project should exist");
    let texts: Vec<&str> = loaded.tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Group", "Leaf", "Top"]);
    assert_eq!(loaded.tasks[0].cost, Some(42.0));

    // The id counter persists as well
    let next = db
        .write_tasks(project.id, |coordinator| coordinator.create(fields("Later")))
        .unwrap();
    assert_eq!(next.id, 4);
}

#[test]
fn test_failed_write_rolls_back() {
    let (_temp_file, mut db) = create_test_db();
    let project = db
        .create_project("Atomic", None, date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();

    let result: Result<(), TrellisError> = db.write_tasks(project.id, |coordinator| {
        coordinator.create(fields("Written then undone"))?;
        coordinator.update(404, Default::default())?;
        Ok(())
    });
    assert!(result.is_err());

    let tasks = db
        .read_tasks(project.id, |coordinator| coordinator.tasks())
        .unwrap();
    assert!(tasks.is_empty());
}

#[test]
fn test_missing_project_is_reported() {
    let (_temp_file, mut db) = create_test_db();

    let read = db.read_tasks(9, |coordinator| coordinator.tasks());
    assert!(matches!(read, Err(TrellisError::ProjectNotFound { id: 9 })));

    let write = db.write_tasks(9, |coordinator| coordinator.create(fields("Nope")));
    assert!(matches!(write, Err(TrellisError::ProjectNotFound { id: 9 })));

    assert!(matches!(
        db.delete_project(9),
        Err(TrellisError::ProjectNotFound { id: 9 })
    ));
}

#[test]
fn test_delete_project_removes_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let doomed = db
        .create_project("Doomed", None, date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();
    let kept = db
        .create_project("Kept", None, date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();
    for id in [doomed.id, kept.id] {
        db.write_tasks(id, |coordinator| coordinator.create(fields("Work")))
            .unwrap();
    }

    db.delete_project(doomed.id).unwrap();

    assert!(db.get_project(doomed.id).unwrap().is_none());
    let summaries = db.list_projects().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Kept");
    assert_eq!(summaries[0].total_tasks, 1);
}
