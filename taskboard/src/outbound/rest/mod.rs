//! REST data source: the same operations as path-addressed resources.
//!
//! A 404 answer means "no such record" and maps to `None` or `false`; every
//! other failure propagates as an error.

mod client;
mod task_repository;
mod user_repository;

pub use client::RestClient;
pub use task_repository::RestTaskRepository;
pub use user_repository::RestUserRepository;
