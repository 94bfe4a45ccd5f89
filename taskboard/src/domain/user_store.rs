//! User store: the state container orchestrating user repository calls.
//!
//! Mirrors the task store and additionally tracks a selected user, which
//! consumers use to pre-fill task ownership.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::{DataSourceError, RepositoryFactory, UserRepository};
use super::store_support::{read_current, remove_entry, replace_entry, write_current};
use super::{DataSourceConfig, DataSourceKind, NewUser, User, UserId, UserPatch};

/// Observable state of a [`UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserStoreState {
    pub users: Vec<User>,
    pub selected_user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub data_source: DataSourceKind,
}

impl UserStoreState {
    /// Identifier of the selected user, if any.
    pub fn selected_user_id(&self) -> Option<UserId> {
        self.selected_user.as_ref().map(|user| user.id)
    }
}

/// State container for users, owned by the composition root.
pub struct UserStore {
    factory: Arc<dyn RepositoryFactory>,
    repository: RwLock<Arc<dyn UserRepository>>,
    state: watch::Sender<UserStoreState>,
}

impl UserStore {
    /// Build a store bound to the adapter `factory` produces for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the initial adapter cannot be built.
    pub fn new(
        factory: Arc<dyn RepositoryFactory>,
        config: &DataSourceConfig,
    ) -> Result<Self, DataSourceError> {
        let repository = factory.user_repository(config)?;
        Ok(Self::with_repository(factory, config.kind, repository))
    }

    /// Build a store around an already constructed repository.
    pub fn with_repository(
        factory: Arc<dyn RepositoryFactory>,
        kind: DataSourceKind,
        repository: Arc<dyn UserRepository>,
    ) -> Self {
        let (state, _) = watch::channel(UserStoreState {
            data_source: kind,
            ..UserStoreState::default()
        });
        Self {
            factory,
            repository: RwLock::new(repository),
            state,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UserStoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<UserStoreState> {
        self.state.subscribe()
    }

    /// Currently selected data-source kind.
    pub fn data_source(&self) -> DataSourceKind {
        self.state.borrow().data_source
    }

    /// Restore the initial empty state, keeping the active repository.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            let data_source = state.data_source;
            *state = UserStoreState {
                data_source,
                ..UserStoreState::default()
            };
        });
    }

    /// Swap the active repository for one built from `config`, then reload.
    pub async fn change_data_source(&self, config: &DataSourceConfig) {
        match self.factory.user_repository(config) {
            Ok(repository) => {
                write_current(&self.repository, repository);
                self.state
                    .send_modify(|state| state.data_source = config.kind);
                info!(data_source = %config.kind, "user data source changed");
                self.fetch_all().await;
            }
            Err(err) => {
                warn!(data_source = %config.kind, error = %err, "user data source unavailable");
                self.state
                    .send_modify(|state| state.error = Some(err.to_string()));
            }
        }
    }

    /// Replace the list with the repository's current contents.
    pub async fn fetch_all(&self) {
        self.begin();
        match self.repository().list().await {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                self.state.send_modify(|state| {
                    state.users = users;
                    state.loading = false;
                });
            }
            Err(err) => self.fail("fetch_all", &err),
        }
    }

    /// Create a user and append it to the list.
    pub async fn create(&self, input: NewUser) -> Option<User> {
        self.begin();
        match self.repository().create(input).await {
            Ok(user) => {
                debug!(user_id = %user.id, "user created");
                self.state.send_modify(|state| {
                    state.users.push(user.clone());
                    state.loading = false;
                });
                Some(user)
            }
            Err(err) => {
                self.fail("create", &err);
                None
            }
        }
    }

    /// Patch a user. An unknown id leaves the list untouched without an error.
    pub async fn update(&self, input: UserPatch) -> Option<User> {
        self.begin();
        match self.repository().update(input).await {
            Ok(updated) => {
                self.state.send_modify(|state| {
                    if let Some(user) = &updated {
                        if state.selected_user_id() == Some(user.id) {
                            state.selected_user = Some(user.clone());
                        }
                        replace_entry(&mut state.users, user.clone());
                    }
                    state.loading = false;
                });
                updated
            }
            Err(err) => {
                self.fail("update", &err);
                None
            }
        }
    }

    /// Delete a user. Tasks referencing it are left as they are.
    ///
    /// Removing the selected user clears the selection.
    pub async fn delete(&self, id: UserId) -> bool {
        self.begin();
        match self.repository().delete(id).await {
            Ok(removed) => {
                self.state.send_modify(|state| {
                    if removed {
                        remove_entry(&mut state.users, id);
                        if state.selected_user_id() == Some(id) {
                            state.selected_user = None;
                        }
                    }
                    state.loading = false;
                });
                removed
            }
            Err(err) => {
                self.fail("delete", &err);
                false
            }
        }
    }

    /// Select a user by id, or clear the selection with `None`.
    ///
    /// Users already in the list resolve without a repository call; others
    /// are fetched with `get_by_id`, and a miss clears the selection.
    pub async fn select_user(&self, id: Option<UserId>) -> Option<User> {
        let Some(id) = id else {
            self.state.send_modify(|state| state.selected_user = None);
            return None;
        };

        let cached = self
            .state
            .borrow()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned();
        if let Some(user) = cached {
            self.state
                .send_modify(|state| state.selected_user = Some(user.clone()));
            return Some(user);
        }

        self.begin();
        match self.repository().get_by_id(id).await {
            Ok(found) => {
                if found.is_none() {
                    debug!(user_id = %id, "selected user not found");
                }
                self.state.send_modify(|state| {
                    state.selected_user.clone_from(&found);
                    state.loading = false;
                });
                found
            }
            Err(err) => {
                self.fail("select_user", &err);
                self.state.send_modify(|state| state.selected_user = None);
                None
            }
        }
    }

    fn repository(&self) -> Arc<dyn UserRepository> {
        read_current(&self.repository)
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn fail(&self, action: &'static str, err: &dyn std::error::Error) {
        warn!(action, error = %err, "user store action failed");
        self.state.send_modify(|state| {
            state.error = Some(err.to_string());
            state.loading = false;
        });
    }
}

#[cfg(test)]
#[path = "user_store_tests.rs"]
mod tests;
