//! Task data model and its create/update input shapes.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::UserId;

/// Sequential task identifier assigned by the owning adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A unit of work, optionally owned by a user.
///
/// ## Invariants
/// - `user_id` is a soft reference: it is never checked against existing
///   users and survives the owner's deletion.
/// - `updated_at` is `None` until an update or toggle succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Apply a partial patch, stamping `updated_at` with `now`.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        self.updated_at = Some(now);
    }

    /// Flip `completed` and stamp `updated_at` with `now`.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.updated_at = Some(now);
    }
}

/// Input accepted by `TaskRepository::create`. New tasks start pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub user_id: Option<UserId>,
}

impl NewTask {
    /// Build a create payload without an owner.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            user_id: None,
        }
    }

    /// Assign the owning user.
    #[must_use]
    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Partial update for an existing task.
///
/// `user_id` distinguishes "leave unchanged" (`None`) from "clear the owner"
/// (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub id: TaskId,
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<Option<UserId>>,
}

impl TaskPatch {
    /// Start an empty patch for `id`.
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            completed: None,
            user_id: None,
        }
    }

    /// Replace the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the completion flag.
    #[must_use]
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Reassign (`Some`) or clear (`None`) the owner.
    #[must_use]
    pub fn user_id(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
