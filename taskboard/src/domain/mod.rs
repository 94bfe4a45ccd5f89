//! Domain models, ports, and the stores that orchestrate them.
//!
//! Purpose: define the task and user shapes, the repository contracts every
//! data source implements, and the state containers consumers drive. Nothing
//! in this module depends on a concrete adapter; adapters live under
//! `outbound` and are handed in through [`ports::RepositoryFactory`].
//!
//! Public surface:
//! - `User`, `Task` and their id, create, and patch shapes.
//! - `DataSourceKind`, `DataSourceConfig`: data-source selection.
//! - `TaskStore`, `UserStore`: state containers and their actions.

mod data_source;
pub mod ports;
mod store_support;
mod task;
mod task_store;
mod user;
mod user_store;

pub use self::data_source::{DataSourceConfig, DataSourceKind, UnknownDataSourceKind};
pub use self::task::{NewTask, Task, TaskId, TaskPatch};
pub use self::task_store::{TaskStore, TaskStoreState};
pub use self::user::{NewUser, User, UserId, UserPatch};
pub use self::user_store::{UserStore, UserStoreState};
