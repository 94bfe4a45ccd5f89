//! Port used by stores to construct a repository for a selected data source.

use std::sync::Arc;

use crate::domain::{DataSourceConfig, DataSourceKind};

use super::define_port_error;
use super::{TaskRepository, UserRepository};

define_port_error! {
    /// Failures raised while constructing a data-source adapter.
    pub enum DataSourceError {
        /// A remote kind was selected without an endpoint.
        MissingEndpoint { kind: DataSourceKind } =>
            "data source `{kind}` requires an endpoint",
        /// The HTTP client backing a remote adapter could not be built.
        Client { message: String } => "failed to build data source client: {message}",
    }
}

/// Maps a tagged [`DataSourceConfig`] to freshly constructed adapters.
///
/// Each call builds a new instance; simulated adapters reload from their
/// storage slot so a switch away and back restores persisted entities.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryFactory: Send + Sync {
    /// Build the task adapter for `config.kind`.
    fn task_repository(
        &self,
        config: &DataSourceConfig,
    ) -> Result<Arc<dyn TaskRepository>, DataSourceError>;

    /// Build the user adapter for `config.kind`.
    fn user_repository(
        &self,
        config: &DataSourceConfig,
    ) -> Result<Arc<dyn UserRepository>, DataSourceError>;
}
