//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The local storage slot could not be read or written.
        Storage { message: String } => "user storage failed: {message}",
        /// The remote service could not be reached.
        Transport { message: String } => "user service request failed: {message}",
        /// The remote service answered with an error.
        Rejected { message: String } => "user service rejected the request: {message}",
        /// The remote payload did not match the user shape.
        Decode { message: String } => "user service returned an invalid payload: {message}",
    }
}

/// Capability set every user data source provides.
///
/// Deleting a user never touches tasks that reference it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user known to the source.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch one user, or `None` when the id is unknown.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Persist a new user and return it with its assigned id.
    async fn create(&self, input: NewUser) -> Result<User, UserRepositoryError>;

    /// Apply a partial patch. Unknown ids yield `Ok(None)`.
    async fn update(&self, input: UserPatch) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user; `true` iff a record was removed.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
