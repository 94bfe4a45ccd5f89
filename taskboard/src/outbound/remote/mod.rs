//! Pieces shared by the HTTP-backed adapters: wire DTOs and error mapping.

mod dto;
mod error;

pub(crate) use dto::{NewTaskDto, NewUserDto, TaskDto, TaskPatchDto, UserDto, UserPatchDto};
pub use error::RemoteError;
pub(crate) use error::{map_status_error, map_transport_error};

use std::time::Duration;

use reqwest::Client;

/// Build the HTTP client shared by one remote adapter.
///
/// # Errors
///
/// Returns the reqwest error when TLS or client setup fails.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
        .build()
}
