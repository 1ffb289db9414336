//! Persistence gateway for products. `ProductStore` is the seam between the
//! catalog service and a concrete backend (PostgreSQL or in-memory).

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;
pub use schema::{ensure_database_exists, ensure_products_table, PRODUCTS_TABLE};

use crate::error::StoreError;
use crate::model::{Category, Product};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return the assigned id. Any `id` on `product` is ignored.
    async fn insert(&self, product: &Product) -> Result<i64, StoreError>;

    /// Overwrite every column of row `id`. Returns false when no row matched.
    async fn update(&self, id: i64, product: &Product) -> Result<bool, StoreError>;

    /// Remove row `id`. Returns false when no row matched.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError>;

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError>;

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError>;

    async fn find_by_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError>;

    /// Reachability check used by `/ready`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
