//! Data Transfer Objects for API requests and responses.
//!
//! Responses for affiliate links serialize the domain entity directly, so the
//! JSON mirrors the stored node.

pub mod affiliate;
pub mod health;
