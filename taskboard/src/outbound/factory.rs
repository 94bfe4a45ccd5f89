//! Builds repositories for a tagged data-source configuration.

use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, DefaultClock};
use tracing::debug;
use url::Url;

use super::graphql::{GraphqlClient, GraphqlTaskRepository, GraphqlUserRepository};
use super::rest::{RestClient, RestTaskRepository, RestUserRepository};
use super::simulated::{
    LatencySleeper, SimulatedRuntime, SimulatedTaskRepository, SimulatedUserRepository,
    TokioSleeper,
};
use super::storage::KeyValueStore;
use crate::domain::ports::{DataSourceError, RepositoryFactory, TaskRepository, UserRepository};
use crate::domain::{DataSourceConfig, DataSourceKind, Task, User};

/// Default delay before each simulated user call.
pub const DEFAULT_USER_LATENCY: Duration = Duration::from_millis(200);
/// Default delay before each simulated task call.
pub const DEFAULT_TASK_LATENCY: Duration = Duration::ZERO;
/// Default request timeout for remote adapters.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// [`RepositoryFactory`] over the simulated, GraphQL, and REST adapters.
///
/// Simulated repositories built by one factory share its storage slots.
pub struct DataSourceFactory {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn LatencySleeper>,
    user_latency: Duration,
    task_latency: Duration,
    http_timeout: Duration,
}

impl DataSourceFactory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Arc::new(DefaultClock),
            sleeper: Arc::new(TokioSleeper),
            user_latency: DEFAULT_USER_LATENCY,
            task_latency: DEFAULT_TASK_LATENCY,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn LatencySleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    #[must_use]
    pub fn with_latencies(mut self, user_latency: Duration, task_latency: Duration) -> Self {
        self.user_latency = user_latency;
        self.task_latency = task_latency;
        self
    }

    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Simulated task adapter over the shared slot.
    pub fn simulated_tasks(&self, seeds: &[Task]) -> SimulatedTaskRepository {
        SimulatedTaskRepository::new(
            self.store.clone(),
            self.runtime(self.task_latency),
            seeds,
        )
    }

    /// Simulated user adapter over the shared slot.
    pub fn simulated_users(&self, seeds: &[User]) -> SimulatedUserRepository {
        SimulatedUserRepository::new(
            self.store.clone(),
            self.runtime(self.user_latency),
            seeds,
        )
    }

    fn runtime(&self, latency: Duration) -> SimulatedRuntime {
        SimulatedRuntime::new(self.clock.clone(), self.sleeper.clone(), latency)
    }

    fn graphql_client(&self, endpoint: Url) -> Result<GraphqlClient, DataSourceError> {
        GraphqlClient::new(endpoint, self.http_timeout)
            .map_err(|err| DataSourceError::client(err.to_string()))
    }

    fn rest_client(&self, base: Url) -> Result<RestClient, DataSourceError> {
        RestClient::new(base, self.http_timeout)
            .map_err(|err| DataSourceError::client(err.to_string()))
    }
}

fn required_endpoint(config: &DataSourceConfig) -> Result<Url, DataSourceError> {
    config
        .endpoint
        .clone()
        .ok_or_else(|| DataSourceError::missing_endpoint(config.kind))
}

impl RepositoryFactory for DataSourceFactory {
    fn task_repository(
        &self,
        config: &DataSourceConfig,
    ) -> Result<Arc<dyn TaskRepository>, DataSourceError> {
        debug!(data_source = %config.kind, "building task repository");
        let repository: Arc<dyn TaskRepository> = match config.kind {
            DataSourceKind::Simulated => Arc::new(self.simulated_tasks(&config.seed_tasks)),
            DataSourceKind::Remote => Arc::new(GraphqlTaskRepository::new(
                self.graphql_client(required_endpoint(config)?)?,
            )),
            DataSourceKind::Rest => Arc::new(RestTaskRepository::new(
                self.rest_client(required_endpoint(config)?)?,
            )),
        };
        Ok(repository)
    }

    fn user_repository(
        &self,
        config: &DataSourceConfig,
    ) -> Result<Arc<dyn UserRepository>, DataSourceError> {
        debug!(data_source = %config.kind, "building user repository");
        let repository: Arc<dyn UserRepository> = match config.kind {
            DataSourceKind::Simulated => Arc::new(self.simulated_users(&config.seed_users)),
            DataSourceKind::Remote => Arc::new(GraphqlUserRepository::new(
                self.graphql_client(required_endpoint(config)?)?,
            )),
            DataSourceKind::Rest => Arc::new(RestUserRepository::new(
                self.rest_client(required_endpoint(config)?)?,
            )),
        };
        Ok(repository)
    }
}
