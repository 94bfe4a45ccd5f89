//! Simulated user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::collection::PersistedCollection;
use super::{SimulatedRuntime, USERS_SLOT, sample_data};
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};
use crate::outbound::storage::{KeyValueStore, StorageError};

/// User repository backed by the `taskboard.users` slot.
///
/// Deleting a user leaves the task slot untouched.
pub struct SimulatedUserRepository {
    users: PersistedCollection<User>,
    runtime: SimulatedRuntime,
}

impl SimulatedUserRepository {
    /// Load the persisted users, installing `seeds` when the slot is empty.
    pub fn new(store: Arc<dyn KeyValueStore>, runtime: SimulatedRuntime, seeds: &[User]) -> Self {
        Self {
            users: PersistedCollection::load(store, USERS_SLOT, seeds),
            runtime,
        }
    }

    /// Delete the slot and every in-memory user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::Storage`] when the slot cannot be removed.
    pub fn clear_all(&self) -> Result<(), UserRepositoryError> {
        self.users.clear().map_err(storage_error)?;
        debug!("simulated users cleared");
        Ok(())
    }

    /// Replace every user with the sample set and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::Storage`] when the slot cannot be written.
    pub fn fill_with_sample_data(&self) -> Result<(), UserRepositoryError> {
        let users = sample_data::sample_users(self.runtime.now());
        let count = users.len();
        self.users.replace_all(users).map_err(storage_error)?;
        debug!(count, "simulated users filled with sample data");
        Ok(())
    }
}

fn storage_error(err: StorageError) -> UserRepositoryError {
    UserRepositoryError::storage(err.to_string())
}

#[async_trait]
impl UserRepository for SimulatedUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.runtime.delay().await;
        Ok(self.users.snapshot())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        self.runtime.delay().await;
        Ok(self.users.find(id.get()))
    }

    async fn create(&self, input: NewUser) -> Result<User, UserRepositoryError> {
        self.runtime.delay().await;
        let now = self.runtime.now();
        self.users
            .insert_with(|id| User {
                id: UserId::new(id),
                name: input.name,
                email: input.email,
                created_at: now,
                updated_at: None,
            })
            .map_err(storage_error)
    }

    async fn update(&self, input: UserPatch) -> Result<Option<User>, UserRepositoryError> {
        self.runtime.delay().await;
        let now = self.runtime.now();
        self.users
            .modify(input.id.get(), |user| user.apply(&input, now))
            .map_err(storage_error)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        self.runtime.delay().await;
        self.users.remove(id.get()).map_err(storage_error)
    }
}
