//! Simulated task repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::collection::PersistedCollection;
use super::{SimulatedRuntime, TASKS_SLOT, sample_data};
use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskId, TaskPatch};
use crate::outbound::storage::{KeyValueStore, StorageError};

/// Task repository backed by the `taskboard.tasks` slot.
pub struct SimulatedTaskRepository {
    tasks: PersistedCollection<Task>,
    runtime: SimulatedRuntime,
}

impl SimulatedTaskRepository {
    /// Load the persisted tasks, installing `seeds` when the slot is empty.
    pub fn new(store: Arc<dyn KeyValueStore>, runtime: SimulatedRuntime, seeds: &[Task]) -> Self {
        Self {
            tasks: PersistedCollection::load(store, TASKS_SLOT, seeds),
            runtime,
        }
    }

    /// Delete the slot and every in-memory task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Storage`] when the slot cannot be removed.
    pub fn clear_all(&self) -> Result<(), TaskRepositoryError> {
        self.tasks.clear().map_err(storage_error)?;
        debug!("simulated tasks cleared");
        Ok(())
    }

    /// Replace every task with the sample set and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Storage`] when the slot cannot be written.
    pub fn fill_with_sample_data(&self) -> Result<(), TaskRepositoryError> {
        let tasks = sample_data::sample_tasks(self.runtime.now());
        let count = tasks.len();
        self.tasks.replace_all(tasks).map_err(storage_error)?;
        debug!(count, "simulated tasks filled with sample data");
        Ok(())
    }
}

fn storage_error(err: StorageError) -> TaskRepositoryError {
    TaskRepositoryError::storage(err.to_string())
}

#[async_trait]
impl TaskRepository for SimulatedTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, TaskRepositoryError> {
        self.runtime.delay().await;
        Ok(self.tasks.snapshot())
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        self.runtime.delay().await;
        Ok(self.tasks.find(id.get()))
    }

    async fn create(&self, input: NewTask) -> Result<Task, TaskRepositoryError> {
        self.runtime.delay().await;
        let now = self.runtime.now();
        self.tasks
            .insert_with(|id| Task {
                id: TaskId::new(id),
                title: input.title,
                completed: false,
                user_id: input.user_id,
                created_at: now,
                updated_at: None,
            })
            .map_err(storage_error)
    }

    async fn update(&self, input: TaskPatch) -> Result<Option<Task>, TaskRepositoryError> {
        self.runtime.delay().await;
        let now = self.runtime.now();
        self.tasks
            .modify(input.id.get(), |task| task.apply(&input, now))
            .map_err(storage_error)
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        self.runtime.delay().await;
        self.tasks.remove(id.get()).map_err(storage_error)
    }

    async fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        self.runtime.delay().await;
        let now = self.runtime.now();
        self.tasks
            .modify(id.get(), |task| task.toggle(now))
            .map_err(storage_error)
    }
}

#[cfg(test)]
#[path = "task_repository_tests.rs"]
mod tests;
