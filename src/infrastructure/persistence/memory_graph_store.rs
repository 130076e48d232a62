//! In-process graph store.
//!
//! Evaluates [`Statement`]s with the same matching rules as the Cypher
//! templates, including their null handling, so it can stand in for Neo4j in
//! local runs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{AffiliateLink, LinkFilter};
use crate::domain::repositories::{GraphSession, GraphStore, Statement};
use crate::error::AppError;

/// Graph store keeping nodes in insertion order behind a lock.
///
/// Clones share the same nodes.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraphStore {
    nodes: Arc<RwLock<Vec<AffiliateLink>>>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node as-is, bypassing statement evaluation.
    pub async fn seed(&self, link: AffiliateLink) {
        self.nodes.write().await.push(link);
    }

    /// Number of stored nodes.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }

    async fn apply(&self, statement: Statement) -> Vec<AffiliateLink> {
        match statement {
            Statement::FindConflicting {
                affiliate_url,
                tags,
            } => {
                let nodes = self.nodes.read().await;
                nodes
                    .iter()
                    .filter(|link| {
                        same_url(link, affiliate_url.as_deref())
                            || carries_all(link, tags.as_deref())
                    })
                    .cloned()
                    .collect()
            }
            Statement::Create(new_link) => {
                let link = AffiliateLink::from_new(new_link, Utc::now());
                self.nodes.write().await.push(link.clone());
                vec![link]
            }
            Statement::List(filter) => {
                let nodes = self.nodes.read().await;
                let mut links: Vec<AffiliateLink> = nodes
                    .iter()
                    .rev()
                    .filter(|link| matches_filter(link, &filter))
                    .cloned()
                    .collect();
                links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                links
            }
            Statement::ListByMerchant { merchant } => {
                let nodes = self.nodes.read().await;
                nodes
                    .iter()
                    .filter(|link| link.merchant == merchant)
                    .cloned()
                    .collect()
            }
            Statement::DeleteByAffiliateUrl { affiliate_url } => {
                self.nodes
                    .write()
                    .await
                    .retain(|link| link.affiliate_url.as_deref() != Some(affiliate_url.as_str()));
                Vec::new()
            }
        }
    }
}

/// `a.affiliateUrl = $affiliateUrl`; null on either side never matches.
fn same_url(link: &AffiliateLink, affiliate_url: Option<&str>) -> bool {
    matches!((link.affiliate_url.as_deref(), affiliate_url), (Some(a), Some(b)) if a == b)
}

/// `all(tag IN $tags WHERE tag IN a.tags)`.
///
/// A null tag list never matches; an empty one matches every node.
fn carries_all(link: &AffiliateLink, tags: Option<&[String]>) -> bool {
    tags.is_some_and(|tags| tags.iter().all(|tag| link.has_tag(tag)))
}

/// `any(tag IN a.tags WHERE tag IN $tags)`, skipped for an empty filter.
fn matches_filter(link: &AffiliateLink, filter: &LinkFilter) -> bool {
    filter.is_empty() || filter.tags.iter().any(|tag| link.has_tag(tag))
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, AppError> {
        Ok(Box::new(MemorySession {
            store: self.clone(),
            closed: false,
        }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Session over a [`MemoryGraphStore`]. Statements apply immediately.
pub struct MemorySession {
    store: MemoryGraphStore,
    closed: bool,
}

#[async_trait]
impl GraphSession for MemorySession {
    async fn run(&mut self, statement: Statement) -> Result<Vec<AffiliateLink>, AppError> {
        if self.closed {
            return Err(AppError::internal("Session is already closed"));
        }
        Ok(self.store.apply(statement).await)
    }

    async fn close(&mut self) -> Result<(), AppError> {
        self.closed = true;
        Ok(())
    }
}
