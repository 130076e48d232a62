//! HTTP request handlers for API endpoints.

pub mod affiliates;
pub mod health;

pub use affiliates::{
    create_affiliate_handler, delete_affiliate_handler, list_affiliates_handler,
    merchant_affiliates_handler,
};
pub use health::health_handler;
