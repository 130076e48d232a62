//! Affiliate link creation, listing and deletion.

use std::sync::Arc;

use crate::domain::derivation::LinkDerivation;
use crate::domain::entities::{AffiliateLink, CreateAffiliateLink, LinkFilter, NewAffiliateLink};
use crate::domain::repositories::{GraphSession, GraphStore, Statement};
use crate::error::AppError;

/// Message attached to a create request rejected by the conflict check.
pub const CONFLICT_MESSAGE: &str = "Affiliate link or the given tags already exists";

/// Service for the four affiliate link operations.
///
/// Every operation acquires its own store session and releases it before
/// returning, whatever the outcome.
pub struct AffiliateService {
    store: Arc<dyn GraphStore>,
    derivation: Arc<dyn LinkDerivation>,
}

impl AffiliateService {
    /// Creates a new affiliate service.
    pub fn new(store: Arc<dyn GraphStore>, derivation: Arc<dyn LinkDerivation>) -> Self {
        Self { store, derivation }
    }

    /// Creates a link unless it collides with a stored one.
    ///
    /// A stored link collides if it has the same `affiliateUrl`, or if it
    /// carries every requested tag. The check and the insert are separate
    /// statements.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with the first colliding link.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create_link(&self, input: CreateAffiliateLink) -> Result<AffiliateLink, AppError> {
        let mut session = self.store.open_session().await?;
        let result = self.create_in(session.as_mut(), input).await;
        release(session).await;
        result
    }

    /// Lists links newest first, optionally keeping only those sharing a tag with `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_links(&self, filter: LinkFilter) -> Result<Vec<AffiliateLink>, AppError> {
        self.run_once(Statement::List(filter)).await
    }

    /// Lists links whose merchant equals `merchant` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_by_merchant(&self, merchant: &str) -> Result<Vec<AffiliateLink>, AppError> {
        self.run_once(Statement::ListByMerchant {
            merchant: merchant.to_string(),
        })
        .await
    }

    /// Deletes the links with this affiliate URL. Deleting an unknown URL succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete_link(&self, affiliate_url: &str) -> Result<(), AppError> {
        self.run_once(Statement::DeleteByAffiliateUrl {
            affiliate_url: affiliate_url.to_string(),
        })
        .await?;

        tracing::debug!(affiliate_url, "Affiliate link deleted");
        Ok(())
    }

    /// Returns true if the store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }

    async fn create_in(
        &self,
        session: &mut dyn GraphSession,
        input: CreateAffiliateLink,
    ) -> Result<AffiliateLink, AppError> {
        let existing = session
            .run(Statement::FindConflicting {
                affiliate_url: input.affiliate_url.clone(),
                tags: input.tags.clone(),
            })
            .await?;

        if let Some(existing) = existing.into_iter().next() {
            tracing::info!(
                affiliate_url = ?input.affiliate_url,
                existing_url = ?existing.affiliate_url,
                "Rejected conflicting affiliate link"
            );
            return Err(AppError::conflict(CONFLICT_MESSAGE, existing));
        }

        let shared_url = self.derivation.shared_url(input.affiliate_url.as_deref());
        let merchant = self.derivation.merchant(input.affiliate_url.as_deref());
        let new_link = NewAffiliateLink {
            shared_url,
            merchant,
            affiliate_url: input.affiliate_url,
            tags: input.tags,
            comment: input.comment,
        };

        session
            .run(Statement::Create(new_link))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("Store returned no record for the created link"))
    }

    /// Runs a single statement in a fresh session.
    async fn run_once(&self, statement: Statement) -> Result<Vec<AffiliateLink>, AppError> {
        let mut session = self.store.open_session().await?;
        let result = session.run(statement).await;
        release(session).await;
        result
    }
}

/// Closes a session. A failed close is logged and otherwise ignored.
async fn release(mut session: Box<dyn GraphSession>) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to release store session");
    }
}
