//! `GET /health`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports whether the graph store answers.
///
/// Responds **200 OK** when it does and **503 Service Unavailable** otherwise,
/// with a body such as:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "store": { "status": "ok", "message": "Graph store reachable" } }
/// }
/// ```
///
/// The store ping runs outside request sessions.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let store = if state.affiliate_service.store_healthy().await {
        CheckStatus::ok("Graph store reachable")
    } else {
        tracing::warn!("Health check: graph store unreachable");
        CheckStatus::error("Graph store unreachable")
    };

    let response = HealthResponse::from_checks(HealthChecks { store });
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response)).into_response()
}
