//! Data-source selection passed to stores when switching backends.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::{Task, User};

/// Tag naming the adapter family behind a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataSourceKind {
    /// Local in-memory collections mirrored into a storage slot.
    #[default]
    Simulated,
    /// GraphQL service reached over HTTP.
    Remote,
    /// Path-addressed REST resources reached over HTTP.
    Rest,
}

impl DataSourceKind {
    /// Stable lowercase tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Remote => "remote",
            Self::Rest => "rest",
        }
    }

    /// Whether the kind talks to a network endpoint.
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Remote | Self::Rest)
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown data-source tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data source `{0}`; expected simulated, remote, or rest")]
pub struct UnknownDataSourceKind(pub String);

impl FromStr for DataSourceKind {
    type Err = UnknownDataSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "mock" | "local" => Ok(Self::Simulated),
            "remote" | "graphql" => Ok(Self::Remote),
            "rest" => Ok(Self::Rest),
            other => Err(UnknownDataSourceKind(other.to_owned())),
        }
    }
}

/// Configuration accepted by `change_data_source`.
///
/// `endpoint` is required for remote kinds. Seed entities only apply to the
/// simulated kind, and only when its storage slot is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataSourceConfig {
    pub kind: DataSourceKind,
    pub endpoint: Option<Url>,
    pub seed_users: Vec<User>,
    pub seed_tasks: Vec<Task>,
}

impl DataSourceConfig {
    /// Simulated source without seeds.
    pub fn simulated() -> Self {
        Self::default()
    }

    /// GraphQL source at `endpoint`.
    pub fn remote(endpoint: Url) -> Self {
        Self {
            kind: DataSourceKind::Remote,
            endpoint: Some(endpoint),
            ..Self::default()
        }
    }

    /// REST source rooted at `base`.
    pub fn rest(base: Url) -> Self {
        Self {
            kind: DataSourceKind::Rest,
            endpoint: Some(base),
            ..Self::default()
        }
    }

    /// Users to install when the simulated user slot is empty.
    #[must_use]
    pub fn with_seed_users(mut self, users: Vec<User>) -> Self {
        self.seed_users = users;
        self
    }

    /// Tasks to install when the simulated task slot is empty.
    #[must_use]
    pub fn with_seed_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.seed_tasks = tasks;
        self
    }
}
