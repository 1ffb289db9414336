//! JSON request body guarded by an exact `Content-Type: application/json` check.

use crate::codec::BAD_DATA;
use crate::error::{AppError, ValidationError};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
};
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Parsed JSON body. Rejects with 415 when the content type is missing or
/// different, before the body is read, with 413 when the body exceeds the limit,
/// and with 400 when the body is not JSON.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()))?;
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;
        let value = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "unparsable request body");
            AppError::Validation(ValidationError::new(BAD_DATA))
        })?;
        Ok(JsonBody(value))
    }
}

fn check_content_type(header: Option<&[u8]>) -> Result<(), AppError> {
    match header {
        None => {
            tracing::error!("No Content-Type specified.");
            Err(unsupported())
        }
        Some(v) if v == JSON_CONTENT_TYPE.as_bytes() => Ok(()),
        Some(v) => {
            tracing::error!(content_type = %String::from_utf8_lossy(v), "Invalid Content-Type");
            Err(unsupported())
        }
    }
}

fn unsupported() -> AppError {
    AppError::UnsupportedMediaType(format!("Content-Type must be {}", JSON_CONTENT_TYPE))
}
