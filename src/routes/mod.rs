//! Router assembly.

mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::middleware::{json_errors, not_found};
use crate::state::AppState;
use axum::{middleware::from_fn, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: common and product routes, a JSON 404 fallback, body limit,
/// JSON rewriting of routing errors, and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(product_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(from_fn(json_errors))
        .layer(TraceLayer::new_for_http())
}
