//! Simulated data source: local collections mirrored into storage slots.
//!
//! Each repository owns one [`collection::PersistedCollection`] keyed by a
//! fixed slot name, so switching away and back restores whatever was
//! persisted. Contract operations await an emulated latency first.

mod collection;
mod latency;
mod records;
mod sample_data;
mod task_repository;
mod user_repository;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

pub use latency::{ImmediateSleeper, LatencySleeper, TokioSleeper};
pub use sample_data::{sample_tasks, sample_users};
pub use task_repository::SimulatedTaskRepository;
pub use user_repository::SimulatedUserRepository;

/// Storage slot holding the simulated task collection.
pub const TASKS_SLOT: &str = "taskboard.tasks";
/// Storage slot holding the simulated user collection.
pub const USERS_SLOT: &str = "taskboard.users";

/// Time and latency collaborators shared by a simulated repository.
#[derive(Clone)]
pub struct SimulatedRuntime {
    pub clock: Arc<dyn Clock>,
    pub sleeper: Arc<dyn LatencySleeper>,
    /// Delay awaited before every contract operation; zero disables it.
    pub latency: Duration,
}

impl SimulatedRuntime {
    pub fn new(clock: Arc<dyn Clock>, sleeper: Arc<dyn LatencySleeper>, latency: Duration) -> Self {
        Self {
            clock,
            sleeper,
            latency,
        }
    }

    /// Current time truncated to the precision the slot preserves.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(3)
    }

    async fn delay(&self) {
        latency::emulate(self.sleeper.as_ref(), self.latency).await;
    }
}
