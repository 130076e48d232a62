//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`AffiliateLink`] - A stored affiliate link node
//!
//! Creation follows the "New Type" pattern used across the crate:
//! - [`CreateAffiliateLink`] - Caller-supplied fields
//! - [`NewAffiliateLink`] - Fully derived insert payload
//! - [`LinkFilter`] - Listing filter

pub mod affiliate_link;

pub use affiliate_link::{AffiliateLink, CreateAffiliateLink, LinkFilter, NewAffiliateLink};
