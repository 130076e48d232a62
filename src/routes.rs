//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: graph store (public)
//! - `/api/affiliates/*`     - Affiliate link REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic catcher** - Generic 500 for panicking handlers
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/affiliates", api::routes::affiliate_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the served application: [`build_router`] behind trailing-slash trimming.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
