//! Task store: the state container orchestrating task repository calls.
//!
//! The store holds the current task list, a loading flag, the last error
//! message, the selected data-source kind, and the active repository. Every
//! action sets `loading`, clears the previous error, awaits the repository,
//! and reconciles the in-memory list with the result. Actions take `&self`
//! and may overlap; overlapping actions resolve last-write-wins.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::{DataSourceError, RepositoryFactory, TaskRepository};
use super::store_support::{read_current, remove_entry, replace_entry, write_current};
use super::{DataSourceConfig, DataSourceKind, NewTask, Task, TaskId, TaskPatch};

/// Observable state of a [`TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskStoreState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    /// Message of the most recent failure, cleared when the next action starts.
    pub error: Option<String>,
    pub data_source: DataSourceKind,
}

/// State container for tasks, owned by the composition root.
pub struct TaskStore {
    factory: Arc<dyn RepositoryFactory>,
    repository: RwLock<Arc<dyn TaskRepository>>,
    state: watch::Sender<TaskStoreState>,
}

impl TaskStore {
    /// Build a store bound to the adapter `factory` produces for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the initial adapter cannot be built.
    pub fn new(
        factory: Arc<dyn RepositoryFactory>,
        config: &DataSourceConfig,
    ) -> Result<Self, DataSourceError> {
        let repository = factory.task_repository(config)?;
        Ok(Self::with_repository(factory, config.kind, repository))
    }

    /// Build a store around an already constructed repository.
    pub fn with_repository(
        factory: Arc<dyn RepositoryFactory>,
        kind: DataSourceKind,
        repository: Arc<dyn TaskRepository>,
    ) -> Self {
        let (state, _) = watch::channel(TaskStoreState {
            data_source: kind,
            ..TaskStoreState::default()
        });
        Self {
            factory,
            repository: RwLock::new(repository),
            state,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TaskStoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<TaskStoreState> {
        self.state.subscribe()
    }

    /// Currently selected data-source kind.
    pub fn data_source(&self) -> DataSourceKind {
        self.state.borrow().data_source
    }

    /// Restore the initial empty state, keeping the active repository.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            let data_source = state.data_source;
            *state = TaskStoreState {
                data_source,
                ..TaskStoreState::default()
            };
        });
    }

    /// Swap the active repository for one built from `config`, then reload.
    ///
    /// When the adapter cannot be built the error is recorded and the
    /// previous repository stays active. A failing reload is not rolled back.
    pub async fn change_data_source(&self, config: &DataSourceConfig) {
        match self.factory.task_repository(config) {
            Ok(repository) => {
                write_current(&self.repository, repository);
                self.state
                    .send_modify(|state| state.data_source = config.kind);
                info!(data_source = %config.kind, "task data source changed");
                self.fetch_all().await;
            }
            Err(err) => {
                warn!(data_source = %config.kind, error = %err, "task data source unavailable");
                self.state
                    .send_modify(|state| state.error = Some(err.to_string()));
            }
        }
    }

    /// Replace the list with the repository's current contents.
    pub async fn fetch_all(&self) {
        self.begin();
        match self.repository().list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.state.send_modify(|state| {
                    state.tasks = tasks;
                    state.loading = false;
                });
            }
            Err(err) => self.fail("fetch_all", &err),
        }
    }

    /// Create a task and append it to the list.
    pub async fn create(&self, input: NewTask) -> Option<Task> {
        self.begin();
        match self.repository().create(input).await {
            Ok(task) => {
                debug!(task_id = %task.id, "task created");
                self.state.send_modify(|state| {
                    state.tasks.push(task.clone());
                    state.loading = false;
                });
                Some(task)
            }
            Err(err) => {
                self.fail("create", &err);
                None
            }
        }
    }

    /// Patch a task. An unknown id leaves the list untouched without an error.
    pub async fn update(&self, input: TaskPatch) -> Option<Task> {
        self.begin();
        let id = input.id;
        match self.repository().update(input).await {
            Ok(updated) => {
                self.reconcile(updated.clone());
                if updated.is_none() {
                    debug!(task_id = %id, "update matched no task");
                }
                updated
            }
            Err(err) => {
                self.fail("update", &err);
                None
            }
        }
    }

    /// Delete a task, dropping it from the list when the repository removed it.
    pub async fn delete(&self, id: TaskId) -> bool {
        self.begin();
        match self.repository().delete(id).await {
            Ok(removed) => {
                self.state.send_modify(|state| {
                    if removed {
                        remove_entry(&mut state.tasks, id);
                    }
                    state.loading = false;
                });
                removed
            }
            Err(err) => {
                self.fail("delete", &err);
                false
            }
        }
    }

    /// Flip a task's completion flag.
    pub async fn toggle_complete(&self, id: TaskId) -> Option<Task> {
        self.begin();
        match self.repository().toggle_complete(id).await {
            Ok(toggled) => {
                self.reconcile(toggled.clone());
                toggled
            }
            Err(err) => {
                self.fail("toggle_complete", &err);
                None
            }
        }
    }

    fn repository(&self) -> Arc<dyn TaskRepository> {
        read_current(&self.repository)
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn reconcile(&self, task: Option<Task>) {
        self.state.send_modify(|state| {
            if let Some(task) = task {
                replace_entry(&mut state.tasks, task);
            }
            state.loading = false;
        });
    }

    fn fail(&self, action: &'static str, err: &dyn std::error::Error) {
        warn!(action, error = %err, "task store action failed");
        self.state.send_modify(|state| {
            state.error = Some(err.to_string());
            state.loading = false;
        });
    }
}

#[cfg(test)]
#[path = "task_store_tests.rs"]
mod tests;
