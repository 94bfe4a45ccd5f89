//! GraphQL envelopes around the shared task and user DTOs.

use serde::{Deserialize, Serialize};

use crate::outbound::remote::{TaskDto, TaskPatchDto, UserDto, UserPatchDto};

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlResponse<D> {
    pub(super) data: Option<D>,
    #[serde(default)]
    pub(super) errors: Vec<GraphqlErrorDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlErrorDto {
    pub(super) message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GraphqlRequest<'a, V> {
    pub(super) query: &'a str,
    pub(super) variables: V,
}

#[derive(Debug, Serialize)]
pub(super) struct IdVariables {
    pub(super) id: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct InputVariables<I> {
    pub(super) input: I,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateTaskInput {
    pub(super) id: i64,
    #[serde(flatten)]
    pub(super) patch: TaskPatchDto,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateUserInput {
    pub(super) id: i64,
    #[serde(flatten)]
    pub(super) patch: UserPatchDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct TasksData {
    pub(super) tasks: Vec<TaskDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskData {
    pub(super) task: Option<TaskDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTaskData {
    pub(super) create_task: TaskDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateTaskData {
    pub(super) update_task: Option<TaskDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteTaskData {
    #[serde(default)]
    pub(super) delete_task: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ToggleTaskData {
    pub(super) toggle_task_complete: Option<TaskDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersData {
    pub(super) users: Vec<UserDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserData {
    pub(super) user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateUserData {
    pub(super) create_user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateUserData {
    pub(super) update_user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteUserData {
    #[serde(default)]
    pub(super) delete_user: Option<bool>,
}
