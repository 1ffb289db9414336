//! Response helpers: serialized products with their status codes.

use crate::model::Product;
use axum::{
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

pub fn ok_one(product: &Product) -> Response {
    (StatusCode::OK, Json(product)).into_response()
}

pub fn ok_many(products: &[Product]) -> Response {
    (StatusCode::OK, Json(products)).into_response()
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created(product: &Product, location: &str) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(location) {
        headers.insert(LOCATION, v);
    }
    (StatusCode::CREATED, headers, Json(product)).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Absolute URL for product `id` when the request named a host, else a path.
pub fn product_location(host: Option<&str>, id: i64) -> String {
    match host.map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) => format!("http://{}/products/{}", host, id),
        None => format!("/products/{}", id),
    }
}
