//! Composition root wiring outbound adapters into the domain stores.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{DataSourceError, TaskRepositoryError, UserRepositoryError};
use crate::domain::{DataSourceConfig, DataSourceKind, TaskStore, UserStore};
use crate::outbound::DataSourceFactory;
use crate::outbound::storage::{DirectoryKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use crate::settings::{SettingsError, TaskboardSettings};

/// Failures raised while assembling a [`TaskBoard`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to open storage directory {}: {message}", path.display())]
    Storage { path: PathBuf, message: String },
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// Failures raised by simulated maintenance operations.
#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

/// Owns both stores and the factory that builds their repositories.
pub struct TaskBoard {
    factory: Arc<DataSourceFactory>,
    tasks: TaskStore,
    users: UserStore,
}

impl TaskBoard {
    /// Build the storage slot, factory, and stores described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when settings are invalid, the storage
    /// directory cannot be opened, or the initial adapters cannot be built.
    pub fn from_settings(settings: &TaskboardSettings) -> Result<Self, BootstrapError> {
        let config = settings.data_source_config()?;
        let store: Arc<dyn KeyValueStore> = match &settings.storage_dir {
            Some(path) => Arc::new(DirectoryKeyValueStore::open(path).map_err(|err| {
                BootstrapError::Storage {
                    path: path.clone(),
                    message: err.to_string(),
                }
            })?),
            None => Arc::new(MemoryKeyValueStore::new()),
        };
        let factory = DataSourceFactory::new(store)
            .with_latencies(settings.user_latency(), settings.task_latency())
            .with_http_timeout(settings.http_timeout());
        Ok(Self::new(factory, &config)?)
    }

    /// Build both stores bound to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the initial adapters cannot be built.
    pub fn new(factory: DataSourceFactory, config: &DataSourceConfig) -> Result<Self, DataSourceError> {
        let factory = Arc::new(factory);
        let tasks = TaskStore::new(factory.clone(), config)?;
        let users = UserStore::new(factory.clone(), config)?;
        info!(data_source = %config.kind, "task board ready");
        Ok(Self {
            factory,
            tasks,
            users,
        })
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Data source the stores currently talk to.
    pub fn data_source(&self) -> DataSourceKind {
        self.tasks.data_source()
    }

    /// Load both lists from the active data source.
    pub async fn load(&self) {
        tokio::join!(self.tasks.fetch_all(), self.users.fetch_all());
    }

    /// Switch both stores to `config` and reload them.
    pub async fn change_data_source(&self, config: &DataSourceConfig) {
        tokio::join!(
            self.tasks.change_data_source(config),
            self.users.change_data_source(config)
        );
    }

    /// Replace the simulated collections with the sample dataset.
    ///
    /// Stores on the simulated source are rebound so they see the new data.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError`] when a storage slot cannot be written.
    pub async fn fill_sample_data(&self) -> Result<(), MaintenanceError> {
        self.factory.simulated_users(&[]).fill_with_sample_data()?;
        self.factory.simulated_tasks(&[]).fill_with_sample_data()?;
        self.reload_simulated().await;
        Ok(())
    }

    /// Delete the simulated collections and their storage slots.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError`] when a storage slot cannot be removed.
    pub async fn clear_simulated_data(&self) -> Result<(), MaintenanceError> {
        self.factory.simulated_users(&[]).clear_all()?;
        self.factory.simulated_tasks(&[]).clear_all()?;
        self.reload_simulated().await;
        Ok(())
    }

    async fn reload_simulated(&self) {
        if self.data_source() == DataSourceKind::Simulated {
            self.change_data_source(&DataSourceConfig::simulated()).await;
        }
    }
}
