#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use affiliate_links_api::application::services::AffiliateService;
use affiliate_links_api::domain::derivation::StaticDerivation;
use affiliate_links_api::domain::entities::AffiliateLink;
use affiliate_links_api::domain::repositories::{GraphSession, GraphStore, Statement};
use affiliate_links_api::error::AppError;
use affiliate_links_api::infrastructure::persistence::MemoryGraphStore;
use affiliate_links_api::routes::build_router;
use affiliate_links_api::state::AppState;
use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};

/// Session bookkeeping shared by a [`CountingStore`] and its sessions.
#[derive(Debug, Default)]
pub struct Counters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub statements: AtomicUsize,
}

/// Wraps a [`MemoryGraphStore`], counting sessions and optionally failing every statement.
#[derive(Clone)]
pub struct CountingStore {
    inner: MemoryGraphStore,
    counters: Arc<Counters>,
    fail_with: Option<String>,
}

impl CountingStore {
    pub fn new(inner: MemoryGraphStore) -> Self {
        Self {
            inner,
            counters: Arc::new(Counters::default()),
            fail_with: None,
        }
    }

    /// Every statement run through this store fails with `message`.
    pub fn failing(inner: MemoryGraphStore, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(inner)
        }
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub fn statements(&self) -> usize {
        self.counters.statements.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for CountingStore {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, AppError> {
        let inner = self.inner.open_session().await?;
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSession {
            inner,
            counters: self.counters.clone(),
            fail_with: self.fail_with.clone(),
        }))
    }

    async fn health_check(&self) -> bool {
        self.fail_with.is_none()
    }
}

struct CountingSession {
    inner: Box<dyn GraphSession>,
    counters: Arc<Counters>,
    fail_with: Option<String>,
}

#[async_trait]
impl GraphSession for CountingSession {
    async fn run(&mut self, statement: Statement) -> Result<Vec<AffiliateLink>, AppError> {
        self.counters.statements.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(AppError::internal(message.clone()));
        }
        self.inner.run(statement).await
    }

    async fn close(&mut self) -> Result<(), AppError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

pub fn create_test_state(store: CountingStore) -> AppState {
    let service = AffiliateService::new(Arc::new(store), Arc::new(StaticDerivation::default()));
    AppState::new(Arc::new(service))
}

pub fn make_server(store: CountingStore) -> TestServer {
    TestServer::new(build_router(create_test_state(store))).unwrap()
}

pub fn stored_link(url: &str, tags: &[&str], merchant: &str, created_at: &str) -> AffiliateLink {
    AffiliateLink {
        affiliate_url: Some(url.to_string()),
        shared_url: Some(url.to_string()),
        merchant: merchant.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        comment: None,
        created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
    }
}

pub async fn seed(store: &MemoryGraphStore, links: &[AffiliateLink]) {
    for link in links {
        store.seed(link.clone()).await;
    }
}
