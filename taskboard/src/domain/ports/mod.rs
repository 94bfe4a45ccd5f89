//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod repository_factory;
mod task_repository;
mod user_repository;

#[cfg(test)]
pub use repository_factory::MockRepositoryFactory;
pub use repository_factory::{DataSourceError, RepositoryFactory};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
