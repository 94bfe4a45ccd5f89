//! Port for task persistence adapters and their errors.
//!
//! Every adapter (simulated storage slot, GraphQL service, REST service)
//! implements [`TaskRepository`] identically so stores can swap them at
//! runtime.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskId, TaskPatch};

use super::define_port_error;

define_port_error! {
    /// Failures raised by task repository adapters.
    ///
    /// A missing record is never an error; it surfaces as `None` or `false`.
    pub enum TaskRepositoryError {
        /// The local storage slot could not be read or written.
        Storage { message: String } => "task storage failed: {message}",
        /// The remote service could not be reached.
        Transport { message: String } => "task service request failed: {message}",
        /// The remote service answered with an error.
        Rejected { message: String } => "task service rejected the request: {message}",
        /// The remote payload did not match the task shape.
        Decode { message: String } => "task service returned an invalid payload: {message}",
    }
}

/// Capability set every task data source provides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Return every task known to the source.
    async fn list(&self) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Fetch one task, or `None` when the id is unknown.
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError>;

    /// Persist a new pending task and return it with its assigned id.
    async fn create(&self, input: NewTask) -> Result<Task, TaskRepositoryError>;

    /// Apply a partial patch. Unknown ids yield `Ok(None)`.
    async fn update(&self, input: TaskPatch) -> Result<Option<Task>, TaskRepositoryError>;

    /// Remove a task; `true` iff a record was removed.
    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError>;

    /// Flip `completed` unconditionally. Unknown ids yield `Ok(None)`.
    async fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError>;
}
