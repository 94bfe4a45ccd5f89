//! REST-backed task repository.

use async_trait::async_trait;
use reqwest::Method;

use super::RestClient;
use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskId, TaskPatch};
use crate::outbound::remote::{NewTaskDto, RemoteError, TaskDto, TaskPatchDto};

const TASKS: &str = "tasks";

/// Task repository over `{base}/tasks` resources.
pub struct RestTaskRepository {
    client: RestClient,
}

impl RestTaskRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn into_task(dto: Option<TaskDto>) -> Result<Option<Task>, TaskRepositoryError> {
    Ok(dto.map(TaskDto::into_domain).transpose()?)
}

#[async_trait]
impl TaskRepository for RestTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, TaskRepositoryError> {
        let tasks: Vec<TaskDto> = self.client.get(&[TASKS]).await?.unwrap_or_default();
        Ok(tasks
            .into_iter()
            .map(TaskDto::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        into_task(self.client.get(&[TASKS, &id.to_string()]).await?)
    }

    async fn create(&self, input: NewTask) -> Result<Task, TaskRepositoryError> {
        let created: Option<TaskDto> = self
            .client
            .send_json(Method::POST, &[TASKS], &NewTaskDto::from(input))
            .await?;
        let dto = created.ok_or_else(|| RemoteError::rejected("task collection not found"))?;
        Ok(dto.into_domain()?)
    }

    async fn update(&self, input: TaskPatch) -> Result<Option<Task>, TaskRepositoryError> {
        let id = input.id.to_string();
        let body = TaskPatchDto::from(input);
        into_task(
            self.client
                .send_json(Method::PATCH, &[TASKS, &id], &body)
                .await?,
        )
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        Ok(self
            .client
            .execute(Method::DELETE, &[TASKS, &id.to_string()])
            .await?)
    }

    async fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        into_task(
            self.client
                .send_json(
                    Method::PATCH,
                    &[TASKS, &id.to_string(), "toggle"],
                    &serde_json::json!({}),
                )
                .await?,
        )
    }
}
