//! GraphQL-backed task repository.

use async_trait::async_trait;
use tracing::debug;

use super::dto::{
    CreateTaskData, DeleteTaskData, IdVariables, InputVariables, TaskData, TasksData,
    ToggleTaskData, UpdateTaskData, UpdateTaskInput,
};
use super::{GraphqlClient, documents, or_fallback};
use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskId, TaskPatch};
use crate::outbound::remote::{NewTaskDto, RemoteError, TaskDto};

/// Task repository speaking to a GraphQL service.
pub struct GraphqlTaskRepository {
    client: GraphqlClient,
}

impl GraphqlTaskRepository {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let data: TasksData = self
            .client
            .execute("ListTasks", documents::LIST_TASKS, serde_json::json!({}))
            .await?;
        data.tasks.into_iter().map(TaskDto::into_domain).collect()
    }

    async fn fetch_task(&self, id: TaskId) -> Result<Option<Task>, RemoteError> {
        let data: TaskData = self
            .client
            .execute("GetTask", documents::GET_TASK, IdVariables { id: id.get() })
            .await?;
        data.task.map(TaskDto::into_domain).transpose()
    }

    async fn patch_task(&self, input: TaskPatch) -> Result<Option<Task>, RemoteError> {
        let variables = InputVariables {
            input: UpdateTaskInput {
                id: input.id.get(),
                patch: input.into(),
            },
        };
        let data: UpdateTaskData = self
            .client
            .execute("UpdateTask", documents::UPDATE_TASK, variables)
            .await?;
        data.update_task.map(TaskDto::into_domain).transpose()
    }

    async fn remove_task(&self, id: TaskId) -> Result<bool, RemoteError> {
        let data: DeleteTaskData = self
            .client
            .execute("DeleteTask", documents::DELETE_TASK, IdVariables { id: id.get() })
            .await?;
        Ok(data.delete_task.unwrap_or(false))
    }

    async fn flip_task(&self, id: TaskId) -> Result<Option<Task>, RemoteError> {
        let data: ToggleTaskData = self
            .client
            .execute(
                "ToggleTaskComplete",
                documents::TOGGLE_TASK_COMPLETE,
                IdVariables { id: id.get() },
            )
            .await?;
        data.toggle_task_complete
            .map(TaskDto::into_domain)
            .transpose()
    }
}

#[async_trait]
impl TaskRepository for GraphqlTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, TaskRepositoryError> {
        Ok(or_fallback("ListTasks", self.fetch_tasks().await, Vec::new()))
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(or_fallback("GetTask", self.fetch_task(id).await, None))
    }

    async fn create(&self, input: NewTask) -> Result<Task, TaskRepositoryError> {
        let variables = InputVariables {
            input: NewTaskDto::from(input),
        };
        let data: CreateTaskData = self
            .client
            .execute("CreateTask", documents::CREATE_TASK, variables)
            .await?;
        let task = data.create_task.into_domain()?;
        debug!(task_id = %task.id, "remote task created");
        Ok(task)
    }

    async fn update(&self, input: TaskPatch) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(or_fallback("UpdateTask", self.patch_task(input).await, None))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        Ok(or_fallback("DeleteTask", self.remove_task(id).await, false))
    }

    async fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(or_fallback("ToggleTaskComplete", self.flip_task(id).await, None))
    }
}
