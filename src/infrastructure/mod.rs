//! Infrastructure layer for external integrations.
//!
//! Implements the store contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Neo4j and in-memory graph stores

pub mod persistence;
