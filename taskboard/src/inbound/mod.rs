//! Inbound adapters driving the stores.
//!
//! The CLI only talks to the composition root and the stores it exposes.

pub mod cli;
