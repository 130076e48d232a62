//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`derivation`] - Server-side derivation of `sharedUrl` and `merchant`
//! - [`repositories`] - Graph store session traits
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; business rules live in [`crate::application::services`].

pub mod derivation;
pub mod entities;
pub mod repositories;
