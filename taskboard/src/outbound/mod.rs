//! Outbound adapters implementing the domain repository ports.
//!
//! - **storage**: key-value slots (in-memory or one file per key)
//! - **simulated**: local collections mirrored into storage slots
//! - **graphql**: fixed GraphQL documents against a remote endpoint
//! - **rest**: path-addressed resources against a remote base URL
//! - **factory**: maps a data-source tag to a constructed adapter
//!
//! Adapters translate between domain types and their wire or storage
//! representations. They hold no store state.

pub mod factory;
pub mod graphql;
mod remote;
pub mod rest;
pub mod simulated;
pub mod storage;

pub use factory::DataSourceFactory;
