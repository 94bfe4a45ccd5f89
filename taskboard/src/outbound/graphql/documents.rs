//! GraphQL documents sent by the remote adapters, one named operation each.

pub(super) const LIST_TASKS: &str = r"query ListTasks {
  tasks { id title completed userId createdAt updatedAt }
}";

pub(super) const GET_TASK: &str = r"query GetTask($id: ID!) {
  task(id: $id) { id title completed userId createdAt updatedAt }
}";

pub(super) const CREATE_TASK: &str = r"mutation CreateTask($input: CreateTaskInput!) {
  createTask(input: $input) { id title completed userId createdAt updatedAt }
}";

pub(super) const UPDATE_TASK: &str = r"mutation UpdateTask($input: UpdateTaskInput!) {
  updateTask(input: $input) { id title completed userId createdAt updatedAt }
}";

pub(super) const DELETE_TASK: &str = r"mutation DeleteTask($id: ID!) {
  deleteTask(id: $id)
}";

pub(super) const TOGGLE_TASK_COMPLETE: &str = r"mutation ToggleTaskComplete($id: ID!) {
  toggleTaskComplete(id: $id) { id title completed userId createdAt updatedAt }
}";

pub(super) const LIST_USERS: &str = r"query ListUsers {
  users { id name email createdAt updatedAt }
}";

pub(super) const GET_USER: &str = r"query GetUser($id: ID!) {
  user(id: $id) { id name email createdAt updatedAt }
}";

pub(super) const CREATE_USER: &str = r"mutation CreateUser($input: CreateUserInput!) {
  createUser(input: $input) { id name email createdAt updatedAt }
}";

pub(super) const UPDATE_USER: &str = r"mutation UpdateUser($input: UpdateUserInput!) {
  updateUser(input: $input) { id name email createdAt updatedAt }
}";

pub(super) const DELETE_USER: &str = r"mutation DeleteUser($id: ID!) {
  deleteUser(id: $id)
}";
