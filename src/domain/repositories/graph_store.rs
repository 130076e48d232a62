//! Session-based graph store interface.

use crate::domain::entities::{AffiliateLink, LinkFilter, NewAffiliateLink};
use crate::error::AppError;
use async_trait::async_trait;

/// A single parameterized statement against `AffiliateLink` nodes.
///
/// Each backend renders statements in its own query language; see
/// [`crate::infrastructure::persistence::cypher`] for the Neo4j templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Links sharing `affiliate_url`, or carrying every tag in `tags`.
    FindConflicting {
        affiliate_url: Option<String>,
        tags: Option<Vec<String>>,
    },
    /// Inserts a link stamped with the store's current time and returns it.
    Create(NewAffiliateLink),
    /// All links (or those intersecting the tag filter), newest first.
    List(LinkFilter),
    /// Links with exactly this merchant.
    ListByMerchant { merchant: String },
    /// Removes links with exactly this affiliate URL. Returns no rows.
    DeleteByAffiliateUrl { affiliate_url: String },
}

/// Factory for request-scoped store sessions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::Neo4jGraphStore`] - Neo4j via `neo4rs`
/// - [`crate::infrastructure::persistence::MemoryGraphStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Acquires a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot hand out a session.
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, AppError>;

    /// Returns true if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}

/// A session handed out by a [`GraphStore`].
///
/// Callers run any number of statements and then call [`GraphSession::close`]
/// exactly once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphSession: Send {
    /// Runs one statement and returns the matched or created links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] carrying the driver's message on store errors.
    async fn run(&mut self, statement: Statement) -> Result<Vec<AffiliateLink>, AppError>;

    /// Releases the session.
    async fn close(&mut self) -> Result<(), AppError>;
}
