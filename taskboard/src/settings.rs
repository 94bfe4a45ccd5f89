//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from `TASKBOARD_*` environment variables or a configuration
//! file. The CLI applies `--source` and `--endpoint` on top afterwards.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{DataSourceConfig, DataSourceKind, UnknownDataSourceKind};
use crate::outbound::factory::{DEFAULT_HTTP_TIMEOUT, DEFAULT_TASK_LATENCY, DEFAULT_USER_LATENCY};

/// Settings values that cannot be turned into a data-source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    DataSource(#[from] UnknownDataSourceKind),
    #[error("invalid endpoint `{value}`: {message}")]
    Endpoint { value: String, message: String },
}

/// Configuration values controlling data-source selection and adapters.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct TaskboardSettings {
    /// Initial data source: `simulated`, `remote`, or `rest`.
    pub data_source: Option<String>,
    /// GraphQL endpoint or REST base URL for remote sources.
    pub endpoint: Option<String>,
    /// Directory holding simulated storage slots; in-memory when unset.
    pub storage_dir: Option<PathBuf>,
    /// Delay before each simulated user call, in milliseconds.
    pub user_latency_ms: Option<u64>,
    /// Delay before each simulated task call, in milliseconds.
    pub task_latency_ms: Option<u64>,
    /// Request timeout for remote sources, in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl TaskboardSettings {
    /// Parsed data-source kind, defaulting to simulated.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DataSource`] for unknown tags.
    pub fn data_source_kind(&self) -> Result<DataSourceKind, SettingsError> {
        Ok(self
            .data_source
            .as_deref()
            .map(str::parse::<DataSourceKind>)
            .transpose()?
            .unwrap_or_default())
    }

    /// Parsed endpoint, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Endpoint`] when the value is not a URL.
    pub fn endpoint_url(&self) -> Result<Option<Url>, SettingsError> {
        self.endpoint
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|err| SettingsError::Endpoint {
                    value: value.to_owned(),
                    message: err.to_string(),
                })
            })
            .transpose()
    }

    /// Initial data-source configuration described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the kind or endpoint is invalid.
    pub fn data_source_config(&self) -> Result<DataSourceConfig, SettingsError> {
        Ok(DataSourceConfig {
            kind: self.data_source_kind()?,
            endpoint: self.endpoint_url()?,
            ..DataSourceConfig::default()
        })
    }

    pub fn user_latency(&self) -> Duration {
        self.user_latency_ms
            .map_or(DEFAULT_USER_LATENCY, Duration::from_millis)
    }

    pub fn task_latency(&self) -> Duration {
        self.task_latency_ms
            .map_or(DEFAULT_TASK_LATENCY, Duration::from_millis)
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout_secs
            .map_or(DEFAULT_HTTP_TIMEOUT, Duration::from_secs)
    }
}
