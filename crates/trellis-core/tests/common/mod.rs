use jiff::civil::date;
use tempfile::TempDir;
use trellis_core::{params::TaskCreate, Planner, PlannerBuilder};

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Minimal task parameters spanning the second half of January 2024.
pub fn task_params(project_id: u64, text: &str) -> TaskCreate {
    TaskCreate {
        project_id,
        parent: None,
        kind: None,
        text: text.to_string(),
        description: None,
        start: date(2024, 1, 15),
        end: date(2024, 1, 31),
        percent: None,
        status: None,
        priority: None,
        assignee: None,
        cost: None,
        links: Vec::new(),
    }
}
