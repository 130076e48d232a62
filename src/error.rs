use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::entities::AffiliateLink;

/// Message returned by the last-resort error path.
pub const UNHANDLED_MESSAGE: &str = "Something went wrong!";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictBody {
    error: String,
    existing_link: AffiliateLink,
}

#[derive(Debug)]
pub enum AppError {
    /// A create request collides with a stored link.
    Conflict {
        message: String,
        existing: Box<AffiliateLink>,
    },
    /// Store or driver failure; the message is passed through to the caller.
    Internal { message: String },
    /// Failure outside a handler's own guard (bad request body, panic).
    Unhandled,
}

impl AppError {
    pub fn conflict(message: impl Into<String>, existing: AffiliateLink) -> Self {
        Self::Conflict {
            message: message.into(),
            existing: Box::new(existing),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Conflict { message, .. } | AppError::Internal { message } => {
                f.write_str(message)
            }
            AppError::Unhandled => f.write_str(UNHANDLED_MESSAGE),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Conflict { message, existing } => (
                StatusCode::CONFLICT,
                Json(ConflictBody {
                    error: message,
                    existing_link: *existing,
                }),
            )
                .into_response(),
            AppError::Internal { message } => {
                tracing::error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: message }),
                )
                    .into_response()
            }
            AppError::Unhandled => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: UNHANDLED_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::error!(error = %rejection.body_text(), "Rejected request body");
        AppError::Unhandled
    }
}

impl From<neo4rs::Error> for AppError {
    fn from(e: neo4rs::Error) -> Self {
        AppError::internal(e.to_string())
    }
}
