//! Affiliate link entity and its creation/filter inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored affiliate link node.
///
/// Serializes to the same camelCase property names the node carries in the
/// graph store. Properties the store never received are omitted instead of
/// being rendered as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_url: Option<String>,
    pub merchant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AffiliateLink {
    /// Materializes a stored link from an insert payload and the store-assigned timestamp.
    pub fn from_new(new_link: NewAffiliateLink, created_at: DateTime<Utc>) -> Self {
        Self {
            affiliate_url: new_link.affiliate_url,
            shared_url: new_link.shared_url,
            merchant: new_link.merchant,
            tags: new_link.tags,
            comment: new_link.comment,
            created_at,
        }
    }

    /// Returns true if the link carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }
}

/// Input data for inserting a new affiliate link.
///
/// Derived fields (`shared_url`, `merchant`) are already resolved; `createdAt`
/// is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAffiliateLink {
    pub affiliate_url: Option<String>,
    pub shared_url: Option<String>,
    pub merchant: String,
    pub tags: Option<Vec<String>>,
    pub comment: Option<String>,
}

/// Caller-supplied fields of a create request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAffiliateLink {
    pub affiliate_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub comment: Option<String>,
}

/// Filter for listing links.
///
/// An empty tag set means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkFilter {
    pub tags: Vec<String>,
}

impl LinkFilter {
    pub fn by_tags(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
