//! Product operations over an explicitly passed store.

use super::ProductValidator;
use crate::codec;
use crate::error::AppError;
use crate::model::{Category, Product};
use crate::store::ProductStore;
use serde_json::Value;

pub struct CatalogService;

impl CatalogService {
    /// Validate and insert; sets `product.id` to the store-assigned id.
    pub async fn create(store: &dyn ProductStore, product: &mut Product) -> Result<(), AppError> {
        ProductValidator::validate(product)?;
        tracing::info!(name = %product.name, "creating product");
        let id = store.insert(product).await?;
        product.id = Some(id);
        Ok(())
    }

    /// Overwrite the row identified by `product.id`.
    pub async fn update(store: &dyn ProductStore, product: &Product) -> Result<(), AppError> {
        let id = ProductValidator::validate_for_update(product)?;
        tracing::info!(id, name = %product.name, "updating product");
        if !store.update(id, product).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Remove the row for `product.id`. Absent rows and unset ids are a no-op.
    pub async fn delete(store: &dyn ProductStore, product: &Product) -> Result<(), AppError> {
        if let Some(id) = product.id {
            tracing::info!(id, name = %product.name, "deleting product");
            store.delete(id).await?;
        }
        Ok(())
    }

    pub async fn all(store: &dyn ProductStore) -> Result<Vec<Product>, AppError> {
        Ok(store.all().await?)
    }

    pub async fn find(store: &dyn ProductStore, id: i64) -> Result<Option<Product>, AppError> {
        Ok(store.find(id).await?)
    }

    pub async fn find_by_name(store: &dyn ProductStore, name: &str) -> Result<Vec<Product>, AppError> {
        Ok(store.find_by_name(name).await?)
    }

    pub async fn find_by_category(
        store: &dyn ProductStore,
        category: Category,
    ) -> Result<Vec<Product>, AppError> {
        Ok(store.find_by_category(category).await?)
    }

    pub async fn find_by_availability(
        store: &dyn ProductStore,
        available: bool,
    ) -> Result<Vec<Product>, AppError> {
        Ok(store.find_by_availability(available).await?)
    }

    /// `price` may be a JSON number or string; it is normalized to a decimal first.
    pub async fn find_by_price(store: &dyn ProductStore, price: &Value) -> Result<Vec<Product>, AppError> {
        let price = codec::parse_price(price)?;
        Ok(store.find_by_price(price).await?)
    }
}

pub fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Product with id '{}' was not found.", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, ValidationError};
    use crate::store::MemoryProductStore;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn product(name: &str, price: &str, available: bool, category: Category) -> Product {
        Product::new(name, "desc", price.parse().unwrap(), available, category)
    }

    async fn seeded() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        for p in [
            product("Fedora", "12.50", true, Category::Cloths),
            product("Apple", "0.99", false, Category::Food),
            product("Fedora", "20.00", false, Category::Cloths),
            product("Hammer", "12.5", true, Category::Tools),
        ] {
            let mut p = p;
            CatalogService::create(&store, &mut p).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn create_assigns_id() {
        let store = MemoryProductStore::new();
        let mut p = product("Fedora", "12.50", true, Category::Cloths);
        CatalogService::create(&store, &mut p).await.unwrap();
        assert!(p.id.is_some());
        let found = CatalogService::find(&store, p.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found, p);
    }

    #[tokio::test]
    async fn create_rejects_empty_name_before_store() {
        let store = MemoryProductStore::new();
        let mut p = product("", "1", true, Category::Food);
        let err = CatalogService::create(&store, &mut p).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(CatalogService::all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_id_and_changes_fields() {
        let store = seeded().await;
        let mut p = CatalogService::find(&store, 1).await.unwrap().unwrap();
        p.description = "testing".into();
        CatalogService::update(&store, &p).await.unwrap();
        let all = CatalogService::all(&store).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[0].description, "testing");
    }

    #[tokio::test]
    async fn update_without_id_is_validation_error() {
        let store = seeded().await;
        let mut p = CatalogService::find(&store, 1).await.unwrap().unwrap();
        p.id = None;
        let err = CatalogService::update(&store, &p).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = seeded().await;
        let p = CatalogService::find(&store, 2).await.unwrap().unwrap();
        CatalogService::delete(&store, &p).await.unwrap();
        CatalogService::delete(&store, &p).await.unwrap();
        assert_eq!(CatalogService::all(&store).await.unwrap().len(), 3);
        assert!(CatalogService::find(&store, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn finders_match_exactly() {
        let store = seeded().await;
        assert_eq!(CatalogService::find_by_name(&store, "Fedora").await.unwrap().len(), 2);
        assert!(CatalogService::find_by_name(&store, "fedora").await.unwrap().is_empty());
        assert_eq!(
            CatalogService::find_by_category(&store, Category::Cloths).await.unwrap().len(),
            2
        );
        let unavailable = CatalogService::find_by_availability(&store, false).await.unwrap();
        assert!(unavailable.iter().all(|p| !p.available));
        assert_eq!(unavailable.len(), 2);
    }

    #[tokio::test]
    async fn find_by_price_normalizes_input() {
        let store = seeded().await;
        let by_string = CatalogService::find_by_price(&store, &json!("12.50")).await.unwrap();
        let by_number = CatalogService::find_by_price(&store, &json!(12.5)).await.unwrap();
        assert_eq!(by_string, by_number);
        assert_eq!(by_string.len(), 2);
        assert!(CatalogService::find_by_price(&store, &json!("cheap")).await.is_err());
    }

    struct FailingStore;

    #[async_trait]
    impl ProductStore for FailingStore {
        async fn insert(&self, _: &Product) -> Result<i64, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn update(&self, _: i64, _: &Product) -> Result<bool, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn delete(&self, _: i64) -> Result<bool, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn all(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find(&self, _: i64) -> Result<Option<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_name(&self, _: &str) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_category(&self, _: Category) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_availability(&self, _: bool) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_price(&self, _: Decimal) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn store_failures_are_distinct_from_validation() {
        let mut p = product("Fedora", "1", true, Category::Cloths);
        let err = CatalogService::create(&FailingStore, &mut p).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert_eq!(p.id, None);

        p.id = None;
        let err = CatalogService::update(&FailingStore, &p).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
