//! Product handlers: create, list/filter, read, update, delete.

use crate::codec;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{Category, Product};
use crate::response::{created, no_content, ok_many, ok_one, product_location};
use crate::service::{not_found, CatalogService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header::HOST, HeaderMap},
    response::Response,
};
use serde_json::Value;
use std::collections::HashMap;

/// Strings accepted as `true` for the `available` filter; anything else is `false`.
const TRUTHY: [&str; 3] = ["true", "yes", "1"];

pub fn parse_available(s: &str) -> bool {
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(s.trim()))
}

/// Path ids that are not integers cannot name a row.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| {
        AppError::NotFound(format!("Product with id '{}' was not found.", id_str))
    })
}

/// A saved product without an id is a server fault, never the client's.
fn assigned_id(product: &Product) -> Result<i64, AppError> {
    product
        .id
        .ok_or_else(|| AppError::Internal(format!("{} was saved without an id", product)))
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|s| !s.is_empty())
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    tracing::info!("Request to Create a Product...");
    tracing::debug!(body = %body, "Processing");
    let mut product = codec::from_json(&body)?;
    CatalogService::create(state.store(), &mut product).await?;
    let id = assigned_id(&product)?;
    tracing::info!(id, "Product with new id saved");
    let host = headers.get(HOST).and_then(|v| v.to_str().ok());
    Ok(created(&product, &product_location(host, id)))
}

/// GET /products with optional `name`, `category`, `available` or `price`, checked in that order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    tracing::info!("Request to list Products...");
    let store = state.store();
    let products = if let Some(name) = param(&params, "name") {
        tracing::info!(name, "Find by name");
        CatalogService::find_by_name(store, name).await?
    } else if let Some(category) = param(&params, "category") {
        tracing::info!(category, "Find by category");
        let category = Category::parse_ignore_case(category)?;
        CatalogService::find_by_category(store, category).await?
    } else if let Some(available) = param(&params, "available") {
        tracing::info!(available, "Find by available");
        CatalogService::find_by_availability(store, parse_available(available)).await?
    } else if let Some(price) = param(&params, "price") {
        tracing::info!(price, "Find by price");
        CatalogService::find_by_price(store, &Value::String(price.to_string())).await?
    } else {
        tracing::info!("Find all");
        CatalogService::all(store).await?
    };
    tracing::info!(count = products.len(), "Products returned");
    Ok(ok_many(&products))
}

/// GET /products/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(id = %id_str, "Request to Retrieve a product");
    let id = parse_id(&id_str)?;
    let product = CatalogService::find(state.store(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(name = %product.name, "Returning product");
    Ok(ok_one(&product))
}

/// PUT /products/:id. The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    tracing::info!(id = %id_str, "Request to Update a product");
    let id = parse_id(&id_str)?;
    let mut product = CatalogService::find(state.store(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    codec::deserialize(&mut product, &body)?;
    product.id = Some(id);
    CatalogService::update(state.store(), &product).await?;
    Ok(ok_one(&product))
}

/// DELETE /products/:id. 204 whether or not the row existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(id = %id_str, "Request to Delete a product");
    let id = parse_id(&id_str)?;
    if let Some(product) = CatalogService::find(state.store(), id).await? {
        CatalogService::delete(state.store(), &product).await?;
    }
    Ok(no_content())
}
