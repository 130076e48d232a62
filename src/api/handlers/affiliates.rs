//! Handlers for affiliate link endpoints.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};

use crate::api::dto::affiliate::{CreateAffiliateLinkRequest, parse_tag_filter};
use crate::api::extract::AppJson;
use crate::domain::entities::AffiliateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an affiliate link.
///
/// # Endpoint
///
/// `POST /api/affiliates`
///
/// # Request Body
///
/// ```json
/// {
///   "affiliateUrl": "https://example.com/ref123",
///   "tags": ["electronics", "gadgets"],
///   "comment": "Test comment"
/// }
/// ```
///
/// # Response
///
/// **201 Created** with the stored link, including the server-assigned
/// `sharedUrl`, `merchant` and `createdAt`.
///
/// # Errors
///
/// Returns 409 Conflict with `{error, existingLink}` if a stored link has the
/// same `affiliateUrl` or already carries every requested tag.
/// Returns 500 with `{error}` on store errors.
pub async fn create_affiliate_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAffiliateLinkRequest>,
) -> Result<(StatusCode, Json<AffiliateLink>), AppError> {
    let link = state.affiliate_service.create_link(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Lists affiliate links, newest first.
///
/// # Endpoint
///
/// `GET /api/affiliates?tags[]=electronics&tags[]=books`
///
/// Without `tags`, returns every link. With `tags`, returns links sharing at
/// least one tag with the filter.
pub async fn list_affiliates_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<AffiliateLink>>, AppError> {
    let filter = parse_tag_filter(query.as_deref());
    let links = state.affiliate_service.list_links(filter).await?;
    Ok(Json(links))
}

/// Lists links of one merchant (exact, case-sensitive match).
///
/// # Endpoint
///
/// `GET /api/affiliates/merchant/{merchant}`
pub async fn merchant_affiliates_handler(
    Path(merchant): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AffiliateLink>>, AppError> {
    let links = state.affiliate_service.list_by_merchant(&merchant).await?;
    Ok(Json(links))
}

/// Deletes the link with the given (URL-encoded) affiliate URL.
///
/// # Endpoint
///
/// `DELETE /api/affiliates/{affiliateUrl}`
///
/// # Behavior
///
/// Idempotent: returns **204 No Content** whether or not a link matched.
pub async fn delete_affiliate_handler(
    Path(affiliate_url): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.affiliate_service.delete_link(&affiliate_url).await?;
    Ok(StatusCode::NO_CONTENT)
}
