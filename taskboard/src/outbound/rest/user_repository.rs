//! REST-backed user repository.

use async_trait::async_trait;
use reqwest::Method;

use super::RestClient;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};
use crate::outbound::remote::{NewUserDto, RemoteError, UserDto, UserPatchDto};

const USERS: &str = "users";

/// User repository over `{base}/users` resources.
pub struct RestUserRepository {
    client: RestClient,
}

impl RestUserRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn into_user(dto: Option<UserDto>) -> Result<Option<User>, UserRepositoryError> {
    Ok(dto.map(UserDto::into_domain).transpose()?)
}

#[async_trait]
impl UserRepository for RestUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let users: Vec<UserDto> = self.client.get(&[USERS]).await?.unwrap_or_default();
        Ok(users
            .into_iter()
            .map(UserDto::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        into_user(self.client.get(&[USERS, &id.to_string()]).await?)
    }

    async fn create(&self, input: NewUser) -> Result<User, UserRepositoryError> {
        let created: Option<UserDto> = self
            .client
            .send_json(Method::POST, &[USERS], &NewUserDto::from(input))
            .await?;
        let dto = created.ok_or_else(|| RemoteError::rejected("user collection not found"))?;
        Ok(dto.into_domain()?)
    }

    async fn update(&self, input: UserPatch) -> Result<Option<User>, UserRepositoryError> {
        let id = input.id.to_string();
        let body = UserPatchDto::from(input);
        into_user(
            self.client
                .send_json(Method::PATCH, &[USERS, &id], &body)
                .await?,
        )
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        Ok(self
            .client
            .execute(Method::DELETE, &[USERS, &id.to_string()])
            .await?)
    }
}
