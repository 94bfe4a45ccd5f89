//! Task and user management core with swappable data sources.
//!
//! The crate is laid out as ports and adapters:
//!
//! - [`domain`]: models, repository ports, and the task and user stores
//! - [`outbound`]: storage slots and the simulated, GraphQL, and REST adapters
//! - [`inbound`]: the command-line adapter driving the stores
//! - [`bootstrap`]: the composition root wiring adapters into stores
//! - [`settings`]: layered configuration

pub mod bootstrap;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bootstrap::TaskBoard;
