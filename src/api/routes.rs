//! API route configuration.

use crate::api::handlers::{
    create_affiliate_handler, delete_affiliate_handler, list_affiliates_handler,
    merchant_affiliates_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Affiliate link routes, mounted under `/api/affiliates`.
///
/// # Endpoints
///
/// - `POST   /`                   - Create a link
/// - `GET    /`                   - List links (optional `tags` filter)
/// - `GET    /merchant/{merchant}` - List links of one merchant
/// - `DELETE /{affiliate_url}`     - Delete a link by its URL-encoded affiliate URL
pub fn affiliate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_affiliates_handler).post(create_affiliate_handler),
        )
        .route("/merchant/{merchant}", get(merchant_affiliates_handler))
        .route("/{affiliate_url}", delete(delete_affiliate_handler))
}
