//! Application layer services implementing business logic.
//!
//! Services consume the domain store traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::affiliate_service::AffiliateService`] - Affiliate link CRUD and conflict rules

pub mod services;
