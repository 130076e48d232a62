//! Business logic services for the application layer.

pub mod affiliate_service;

pub use affiliate_service::AffiliateService;
