//! Neo4j implementation of the graph store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use neo4rs::{Config, ConfigBuilder, Graph, Row, Txn};
use serde::de::DeserializeOwned;

use super::cypher;
use crate::domain::entities::AffiliateLink;
use crate::domain::repositories::{GraphSession, GraphStore, Statement};
use crate::error::AppError;

/// Errors raised while turning a result row into an [`AffiliateLink`].
#[derive(Debug, thiserror::Error)]
pub enum RowDecodeError {
    #[error("Failed to read column `{column}`: {reason}")]
    Column { column: &'static str, reason: String },

    #[error("AffiliateLink node has no `{0}` property")]
    Missing(&'static str),

    #[error("Invalid createdAt timestamp `{value}`: {reason}")]
    Timestamp { value: String, reason: String },
}

impl From<RowDecodeError> for AppError {
    fn from(e: RowDecodeError) -> Self {
        AppError::internal(e.to_string())
    }
}

/// Connection settings for [`Neo4jGraphStore`].
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

/// Graph store backed by a `neo4rs` connection pool.
///
/// Each session owns one explicit transaction. Closing the session commits it,
/// or rolls it back if any statement in the session failed.
pub struct Neo4jGraphStore {
    graph: Graph,
}

impl Neo4jGraphStore {
    /// Creates a store from an existing driver handle.
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Builds the connection pool for `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the settings or cannot set up the pool.
    pub async fn connect(settings: &Neo4jSettings) -> Result<Self, neo4rs::Error> {
        let graph = Graph::connect(driver_config(settings)?).await?;
        Ok(Self::new(graph))
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, AppError> {
        let txn = self.graph.start_txn().await?;
        Ok(Box::new(Neo4jSession {
            txn: Some(txn),
            failed: false,
        }))
    }

    async fn health_check(&self) -> bool {
        match self.graph.run(neo4rs::query("RETURN 1")).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Neo4j health check failed");
                false
            }
        }
    }
}

fn driver_config(settings: &Neo4jSettings) -> Result<Config, neo4rs::Error> {
    ConfigBuilder::default()
        .uri(settings.uri.as_str())
        .user(settings.user.as_str())
        .password(settings.password.as_str())
        .db(settings.database.as_str())
        .max_connections(settings.max_connections)
        .build()
}

/// A session bound to one Neo4j transaction.
pub struct Neo4jSession {
    txn: Option<Txn>,
    failed: bool,
}

impl Neo4jSession {
    async fn execute(txn: &mut Txn, statement: Statement) -> Result<Vec<AffiliateLink>, AppError> {
        let query = cypher::render(statement);

        if !query.returns_links() {
            txn.run(query.into()).await?;
            return Ok(Vec::new());
        }

        let mut stream = txn.execute(query.into()).await?;
        let mut links = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await? {
            links.push(link_from_row(&row)?);
        }

        Ok(links)
    }
}

#[async_trait]
impl GraphSession for Neo4jSession {
    async fn run(&mut self, statement: Statement) -> Result<Vec<AffiliateLink>, AppError> {
        let txn = self
            .txn
            .as_mut()
            .ok_or_else(|| AppError::internal("Session is already closed"))?;

        let result = Self::execute(txn, statement).await;
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    async fn close(&mut self) -> Result<(), AppError> {
        let Some(txn) = self.txn.take() else {
            return Ok(());
        };

        if self.failed {
            txn.rollback().await?;
        } else {
            txn.commit().await?;
        }

        Ok(())
    }
}

fn column<T: DeserializeOwned>(row: &Row, column: &'static str) -> Result<T, RowDecodeError> {
    row.get::<T>(column).map_err(|e| RowDecodeError::Column {
        column,
        reason: e.to_string(),
    })
}

/// Maps one projected row to a link.
fn link_from_row(row: &Row) -> Result<AffiliateLink, RowDecodeError> {
    let created_at: Option<String> = column(row, "createdAt")?;
    let created_at = created_at.ok_or(RowDecodeError::Missing("createdAt"))?;

    Ok(AffiliateLink {
        affiliate_url: column(row, "affiliateUrl")?,
        shared_url: column(row, "sharedUrl")?,
        merchant: column::<Option<String>>(row, "merchant")?
            .ok_or(RowDecodeError::Missing("merchant"))?,
        tags: column(row, "tags")?,
        comment: column(row, "comment")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Parses the string form of a Neo4j `datetime()`.
///
/// Servers with a named default zone append it after the offset, as in
/// `2024-01-01T01:00:00+01:00[Europe/Berlin]`; the offset alone fixes the instant.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RowDecodeError> {
    let rfc3339 = match value.find('[') {
        Some(zone) if value.ends_with(']') => &value[..zone],
        _ => value,
    };

    DateTime::parse_from_rfc3339(rfc3339)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RowDecodeError::Timestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
