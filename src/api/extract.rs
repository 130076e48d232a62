//! Request extractors with the API's error format.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections go through the last-resort error path.
///
/// Bodies not declared as JSON are not read: the payload is deserialized from
/// an empty object instead, so every optional field ends up absent.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_json(&req) {
            tracing::debug!("Request body is not JSON; treating it as empty");
            let value = serde_json::from_str("{}").map_err(|e| {
                tracing::error!(error = %e, "Empty body does not fit the payload");
                AppError::Unhandled
            })?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn declares_json(req: &Request) -> bool {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
