//! Router-level middleware.

use crate::error::{error_response, AppError};
use axum::{
    extract::Request,
    http::{
        header::{ALLOW, CONTENT_TYPE},
        StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Give error responses produced outside handlers (405 from method routing, 413 from the
/// body limit) the same JSON error body as `AppError`. JSON responses pass through.
pub async fn json_errors(req: Request, next: Next) -> Response {
    let resp = next.run(req).await;
    let status = resp.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&resp) {
        return resp;
    }
    let allow = resp.headers().get(ALLOW).cloned();
    let mut rewritten = match status {
        StatusCode::METHOD_NOT_ALLOWED => {
            AppError::MethodNotAllowed("Method not allowed for this resource".into()).into_response()
        }
        StatusCode::PAYLOAD_TOO_LARGE => {
            AppError::PayloadTooLarge("Request body is too large".into()).into_response()
        }
        other => error_response(other, other.canonical_reason().unwrap_or("Error").to_string()),
    };
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(ALLOW, allow);
    }
    rewritten
}

fn is_json(resp: &Response) -> bool {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

/// Router fallback for paths no route matches.
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("Resource '{}' was not found.", uri.path()))
}
