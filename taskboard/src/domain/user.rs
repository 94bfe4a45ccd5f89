//! User data model and its create/update input shapes.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Sequential user identifier assigned by the owning adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A person tasks may be assigned to.
///
/// Tasks refer to users by [`UserId`] only; deleting a user leaves those
/// references in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Set by the first successful update; absent before that.
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Apply a partial patch, stamping `updated_at` with `now`.
    pub fn apply(&mut self, patch: &UserPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        self.updated_at = Some(now);
    }
}

/// Input accepted by `UserRepository::create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Build a create payload.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Partial update for an existing user; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Start an empty patch for `id`.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
        }
    }

    /// Replace the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
