//! Helpers for integration tests: an in-memory app and a request driver.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use product_catalog::{app, AppState, Category, Product, ProductStore, StoreError};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const BASE_URL: &str = "/products";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw).expect("response body is JSON")
    }
}

/// The full router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(AppState::in_memory())
    }

    pub fn with_state(state: AppState) -> Self {
        TestApp { router: app(state) }
    }

    /// The full router over a store whose every call fails.
    pub fn failing() -> Self {
        Self::with_state(AppState::new(Arc::new(FailingStore)))
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("host", "localhost");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("valid request");
        self.send_request(req).await
    }

    pub async fn send_request(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let headers = resp.headers().clone();
        let raw = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec();
        TestResponse { status, headers, raw }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some("application/json"), Some(body.to_string()))
            .await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some("application/json"), Some(body.to_string()))
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// POST each payload, asserting 201, and return the created bodies.
    pub async fn create_products(&self, payloads: &[Value]) -> Vec<Value> {
        let mut out = Vec::with_capacity(payloads.len());
        for p in payloads {
            let resp = self.post_json(BASE_URL, p).await;
            assert_eq!(resp.status, StatusCode::CREATED, "could not create test product");
            out.push(resp.json());
        }
        out
    }

    pub async fn product_count(&self) -> usize {
        let resp = self.get(BASE_URL).await;
        assert_eq!(resp.status, StatusCode::OK);
        resp.json().as_array().expect("array").len()
    }
}

pub fn product(name: &str, price: &str, available: bool, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("A {}", name.to_lowercase()),
        "price": price,
        "available": available,
        "category": category,
    })
}

/// A fixed mix of names, categories, prices and availability.
pub fn sample_products() -> Vec<Value> {
    vec![
        product("Fedora", "12.50", true, "CLOTHS"),
        product("Apple", "0.99", false, "FOOD"),
        product("Fedora", "20.00", false, "CLOTHS"),
        product("Hammer", "12.50", true, "TOOLS"),
        product("Toaster", "34.95", true, "HOUSEWARES"),
    ]
}

/// A store that behaves like an unreachable database.
pub struct FailingStore;

fn unreachable_db<T>() -> Result<T, StoreError> {
    Err(StoreError::Db(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn insert(&self, _: &Product) -> Result<i64, StoreError> {
        unreachable_db()
    }
    async fn update(&self, _: i64, _: &Product) -> Result<bool, StoreError> {
        unreachable_db()
    }
    async fn delete(&self, _: i64) -> Result<bool, StoreError> {
        unreachable_db()
    }
    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        unreachable_db()
    }
    async fn find(&self, _: i64) -> Result<Option<Product>, StoreError> {
        unreachable_db()
    }
    async fn find_by_name(&self, _: &str) -> Result<Vec<Product>, StoreError> {
        unreachable_db()
    }
    async fn find_by_category(&self, _: Category) -> Result<Vec<Product>, StoreError> {
        unreachable_db()
    }
    async fn find_by_availability(&self, _: bool) -> Result<Vec<Product>, StoreError> {
        unreachable_db()
    }
    async fn find_by_price(&self, _: Decimal) -> Result<Vec<Product>, StoreError> {
        unreachable_db()
    }
    async fn ping(&self) -> Result<(), StoreError> {
        unreachable_db()
    }
}
