//! JSON shapes exchanged with remote task services.
//!
//! Responses decode into these DTOs first and map into domain records in one
//! pass. Identifiers are accepted as JSON numbers or numeric strings because
//! GraphQL `ID` scalars commonly serialize as text.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::RemoteError;
use crate::domain::{NewTask, NewUser, Task, TaskId, TaskPatch, User, UserId, UserPatch};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id `{text}`"))),
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    RawId::deserialize(deserializer)?.into_id()
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_id)
        .transpose()
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, RemoteError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| RemoteError::decode(format!("invalid {field} `{raw}`: {err}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskDto {
    #[serde(deserialize_with = "deserialize_id")]
    id: i64,
    title: String,
    #[serde(default)]
    completed: bool,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    user_id: Option<i64>,
    created_at: String,
    #[serde(default)]
    updated_at: Option<String>,
}

impl TaskDto {
    pub(crate) fn into_domain(self) -> Result<Task, RemoteError> {
        Ok(Task {
            id: TaskId::new(self.id),
            title: self.title,
            completed: self.completed,
            user_id: self.user_id.map(UserId::new),
            created_at: parse_timestamp("createdAt", &self.created_at)?,
            updated_at: self
                .updated_at
                .as_deref()
                .map(|raw| parse_timestamp("updatedAt", raw))
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    #[serde(deserialize_with = "deserialize_id")]
    id: i64,
    name: String,
    email: String,
    created_at: String,
    #[serde(default)]
    updated_at: Option<String>,
}

impl UserDto {
    pub(crate) fn into_domain(self) -> Result<User, RemoteError> {
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            created_at: parse_timestamp("createdAt", &self.created_at)?,
            updated_at: self
                .updated_at
                .as_deref()
                .map(|raw| parse_timestamp("updatedAt", raw))
                .transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewTaskDto {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
}

impl From<NewTask> for NewTaskDto {
    fn from(input: NewTask) -> Self {
        Self {
            title: input.title,
            user_id: input.user_id.map(UserId::get),
        }
    }
}

/// Partial task update; an explicit `"userId": null` clears the owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskPatchDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Option<i64>>,
}

impl From<TaskPatch> for TaskPatchDto {
    fn from(patch: TaskPatch) -> Self {
        Self {
            title: patch.title,
            completed: patch.completed,
            user_id: patch.user_id.map(|owner| owner.map(UserId::get)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewUserDto {
    name: String,
    email: String,
}

impl From<NewUser> for NewUserDto {
    fn from(input: NewUser) -> Self {
        Self {
            name: input.name,
            email: input.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UserPatchDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl From<UserPatch> for UserPatchDto {
    fn from(patch: UserPatch) -> Self {
        Self {
            name: patch.name,
            email: patch.email,
        }
    }
}
