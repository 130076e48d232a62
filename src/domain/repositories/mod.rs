//! Store trait definitions for the domain layer.
//!
//! The service never talks to a database driver directly. It asks a
//! [`GraphStore`] for a session, runs [`Statement`]s through it and closes it.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod graph_store;

pub use graph_store::{GraphSession, GraphStore, Statement};

#[cfg(test)]
pub use graph_store::{MockGraphSession, MockGraphStore};
