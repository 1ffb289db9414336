//! In-process store: a `BTreeMap` keyed by id behind a lock.

use super::ProductStore;
use crate::error::StoreError;
use crate::model::{Category, Product};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// Same contract as the PostgreSQL store; ids start at 1 and rows list in id order.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<F>(&self, pred: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let inner = self.inner.read().await;
        inner.rows.values().filter(|p| pred(*p)).cloned().collect()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let mut row = product.clone();
        row.id = Some(id);
        inner.rows.insert(id, row);
        Ok(id)
    }

    async fn update(&self, id: i64, product: &Product) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(row) => {
                *row = product.clone();
                row.id = Some(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.filter(|_| true).await)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self.filter(|p| p.name == name).await)
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError> {
        Ok(self.filter(|p| p.category == category).await)
    }

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError> {
        Ok(self.filter(|p| p.available == available).await)
    }

    async fn find_by_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError> {
        Ok(self.filter(|p| p.price == price).await)
    }
}
