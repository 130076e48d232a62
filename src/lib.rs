//! # Affiliate Links API
//!
//! A small REST service storing affiliate links as nodes in a graph database,
//! built with Axum and Neo4j.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, derivation rules and graph store traits
//! - **Application Layer** ([`application`]) - The affiliate link service
//! - **Infrastructure Layer** ([`infrastructure`]) - Neo4j and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! Every operation opens a store session, runs parameterized statements, maps
//! the rows to [`domain::entities::AffiliateLink`]s and releases the session,
//! on success and failure alike.
//!
//! ## Quick Start
//!
//! ```bash
//! export NEO4J_URI="neo4j://localhost:7687"
//! export NEO4J_PASSWORD="password"
//!
//! # Or, without a database:
//! export STORE_BACKEND=memory
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::AffiliateService;
    pub use crate::domain::derivation::{LinkDerivation, StaticDerivation};
    pub use crate::domain::entities::{AffiliateLink, CreateAffiliateLink, LinkFilter};
    pub use crate::domain::repositories::{GraphSession, GraphStore, Statement};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryGraphStore;
    pub use crate::state::AppState;
}
