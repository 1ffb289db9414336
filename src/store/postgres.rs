//! PostgreSQL-backed store. Writes run inside a transaction so a failed statement
//! leaves no partial change behind.

use super::ProductStore;
use crate::error::StoreError;
use crate::model::{Category, Product};
use crate::sql::{self, ProductColumn};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres, Row};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = Category::from_str(&row.category)
            .map_err(|e| StoreError::Corrupt(format!("product {}: {}", row.id, e)))?;
        Ok(Product {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            available: row.available,
            category,
        })
    }
}

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many<'q>(
        &self,
        query: QueryAs<'q, Postgres, ProductRow, PgArguments>,
    ) -> Result<Vec<Product>, StoreError> {
        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }
}

/// Bind the writable columns in `ProductColumn::WRITABLE` order, shared by INSERT and UPDATE.
fn bind_writable<'q>(
    query: sqlx::query::Query<'q, Postgres, PgArguments>,
    product: &'q Product,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    query
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn insert(&self, product: &Product) -> Result<i64, StoreError> {
        let sql = sql::insert();
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = bind_writable(sqlx::query(&sql), product)
            .fetch_one(&mut *tx)
            .await?;
        let id: i64 = row.try_get(ProductColumn::Id.name())?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, product: &Product) -> Result<bool, StoreError> {
        let sql = sql::update();
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = bind_writable(sqlx::query(&sql), product)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let sql = sql::delete();
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        let sql = sql::select_all();
        tracing::debug!(sql = %sql, "query");
        self.fetch_many(sqlx::query_as(&sql)).await
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let sql = sql::select_where(ProductColumn::Id);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Product::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        let sql = sql::select_where(ProductColumn::Name);
        tracing::debug!(sql = %sql, name, "query");
        self.fetch_many(sqlx::query_as(&sql).bind(name)).await
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError> {
        let sql = sql::select_where(ProductColumn::Category);
        tracing::debug!(sql = %sql, %category, "query");
        self.fetch_many(sqlx::query_as(&sql).bind(category.as_str())).await
    }

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError> {
        let sql = sql::select_where(ProductColumn::Available);
        tracing::debug!(sql = %sql, available, "query");
        self.fetch_many(sqlx::query_as(&sql).bind(available)).await
    }

    async fn find_by_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError> {
        let sql = sql::select_where(ProductColumn::Price);
        tracing::debug!(sql = %sql, %price, "query");
        self.fetch_many(sqlx::query_as(&sql).bind(price)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
