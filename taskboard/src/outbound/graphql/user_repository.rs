//! GraphQL-backed user repository.

use async_trait::async_trait;
use tracing::debug;

use super::dto::{
    CreateUserData, DeleteUserData, IdVariables, InputVariables, UpdateUserData, UpdateUserInput,
    UserData, UsersData,
};
use super::{GraphqlClient, documents, or_fallback};
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};
use crate::outbound::remote::{NewUserDto, RemoteError, UserDto};

/// User repository speaking to a GraphQL service.
pub struct GraphqlUserRepository {
    client: GraphqlClient,
}

impl GraphqlUserRepository {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    async fn fetch_users(&self) -> Result<Vec<User>, RemoteError> {
        let data: UsersData = self
            .client
            .execute("ListUsers", documents::LIST_USERS, serde_json::json!({}))
            .await?;
        data.users.into_iter().map(UserDto::into_domain).collect()
    }

    async fn fetch_user(&self, id: UserId) -> Result<Option<User>, RemoteError> {
        let data: UserData = self
            .client
            .execute("GetUser", documents::GET_USER, IdVariables { id: id.get() })
            .await?;
        data.user.map(UserDto::into_domain).transpose()
    }

    async fn patch_user(&self, input: UserPatch) -> Result<Option<User>, RemoteError> {
        let variables = InputVariables {
            input: UpdateUserInput {
                id: input.id.get(),
                patch: input.into(),
            },
        };
        let data: UpdateUserData = self
            .client
            .execute("UpdateUser", documents::UPDATE_USER, variables)
            .await?;
        data.update_user.map(UserDto::into_domain).transpose()
    }

    async fn remove_user(&self, id: UserId) -> Result<bool, RemoteError> {
        let data: DeleteUserData = self
            .client
            .execute("DeleteUser", documents::DELETE_USER, IdVariables { id: id.get() })
            .await?;
        Ok(data.delete_user.unwrap_or(false))
    }
}

#[async_trait]
impl UserRepository for GraphqlUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(or_fallback("ListUsers", self.fetch_users().await, Vec::new()))
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(or_fallback("GetUser", self.fetch_user(id).await, None))
    }

    async fn create(&self, input: NewUser) -> Result<User, UserRepositoryError> {
        let variables = InputVariables {
            input: NewUserDto::from(input),
        };
        let data: CreateUserData = self
            .client
            .execute("CreateUser", documents::CREATE_USER, variables)
            .await?;
        let user = data.create_user.into_domain()?;
        debug!(user_id = %user.id, "remote user created");
        Ok(user)
    }

    async fn update(&self, input: UserPatch) -> Result<Option<User>, UserRepositoryError> {
        Ok(or_fallback("UpdateUser", self.patch_user(input).await, None))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        Ok(or_fallback("DeleteUser", self.remove_user(id).await, false))
    }
}
