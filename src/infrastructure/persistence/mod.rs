//! Graph store implementations.
//!
//! # Stores
//!
//! - [`Neo4jGraphStore`] - Neo4j via `neo4rs`, one transaction per session
//! - [`MemoryGraphStore`] - In-process store for local runs and tests
//!
//! [`cypher`] holds the query templates the Neo4j store renders.

pub mod cypher;
pub mod memory_graph_store;
pub mod neo4j_graph_store;

pub use memory_graph_store::MemoryGraphStore;
pub use neo4j_graph_store::{Neo4jGraphStore, Neo4jSettings};
