//! Project-scoped task storage.
//!
//! A [`TaskStore`] is a handle onto exactly one project's ordered task
//! collection. Collection order is authoritative: numbering is derived from
//! it, so `list_tasks` must return tasks in the order they were inserted.
//!
//! Each mutating method is one logical write and must be applied entirely or
//! not at all. The lifecycle coordinator validates against a snapshot before
//! calling any of them and never issues more than one per operation.

use crate::{
    error::{Result, TrellisError},
    models::Task,
};

/// Ordered task collection of a single project.
pub trait TaskStore {
    /// All tasks in collection order.
    fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Id the next created task will receive. Ids are never reused, even
    /// after the task holding one is deleted.
    fn next_task_id(&self) -> Result<u64>;

    /// Inserts `task` at collection `index` and advances the id counter past
    /// `task.id`.
    fn insert(&mut self, index: usize, task: Task) -> Result<()>;

    /// Replaces the stored task with the same id, keeping its position.
    fn replace(&mut self, task: Task) -> Result<()>;

    /// Deletes every task in `ids` and replaces each task in `relinked`, as
    /// one write.
    fn remove(&mut self, ids: &[u64], relinked: Vec<Task>) -> Result<()>;
}

/// In-memory [`TaskStore`], suitable for tests and embedding.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl MemoryStore {
    /// Empty store whose first task receives id 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Store seeded with existing tasks, in the given order.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id + 1).max().unwrap_or(1);
        Self { tasks, next_id }
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TrellisError::TaskNotFound { id })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn next_task_id(&self) -> Result<u64> {
        Ok(self.next_id)
    }

    fn insert(&mut self, index: usize, task: Task) -> Result<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(TrellisError::validation("id")
                .with_reason(format!("Task {} already exists", task.id)));
        }
        let index = index.min(self.tasks.len());
        self.next_id = self.next_id.max(task.id + 1);
        self.tasks.insert(index, task);
        Ok(())
    }

    fn replace(&mut self, task: Task) -> Result<()> {
        let index = self.position(task.id)?;
        self.tasks[index] = task;
        Ok(())
    }

    fn remove(&mut self, ids: &[u64], relinked: Vec<Task>) -> Result<()> {
        let mut positions = Vec::with_capacity(relinked.len());
        for task in &relinked {
            positions.push(self.position(task.id)?);
        }
        for (index, task) in positions.into_iter().zip(relinked) {
            self.tasks[index] = task;
        }
        self.tasks.retain(|t| !ids.contains(&t.id));
        Ok(())
    }
}
