//! GraphQL data source.
//!
//! Each repository operation is one named document POSTed to the endpoint.
//! Only `create` reports failures to the caller; every other operation logs
//! the failure and answers with an empty list, `None`, or `false`.

mod client;
mod documents;
mod dto;
mod task_repository;
mod user_repository;

use std::fmt::Display;

use tracing::warn;

pub use client::GraphqlClient;
pub use task_repository::GraphqlTaskRepository;
pub use user_repository::GraphqlUserRepository;

/// Collapse a failed remote call into `fallback`, logging the cause.
fn or_fallback<T, E: Display>(operation: &'static str, result: Result<T, E>, fallback: T) -> T {
    result.unwrap_or_else(|err| {
        warn!(operation, error = %err, "GraphQL request failed; using fallback");
        fallback
    })
}
