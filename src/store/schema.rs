//! Products table DDL and database bootstrap.

use crate::error::StoreError;
use crate::sql::quoted;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgPool};
use std::str::FromStr;

pub const PRODUCTS_TABLE: &str = "products";

const MAINTENANCE_DB: &str = "postgres";

/// Create the products table if not exists. Safe to run on every startup.
pub async fn ensure_products_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description VARCHAR(250) NOT NULL DEFAULT '',
            price NUMERIC(14, 2) NOT NULL,
            available BOOLEAN NOT NULL DEFAULT TRUE,
            category VARCHAR(32) NOT NULL DEFAULT 'UNKNOWN'
        )
        "#,
        PRODUCTS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Name of the database `database_url` points at, when it is one that may need creating.
/// `None` for URLs without a database path and for the `postgres` maintenance database.
pub fn target_database(database_url: &str) -> Result<Option<String>, StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    Ok(opts
        .get_database()
        .map(str::trim)
        .filter(|db| !db.is_empty() && *db != MAINTENANCE_DB)
        .map(str::to_string))
}

/// Create the catalog database on first start. Runs over a single connection to the
/// maintenance database, before the main pool exists.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some(catalog_db) = target_database(database_url)? else {
        return Ok(());
    };
    let mut conn = PgConnectOptions::from_str(database_url)?
        .database(MAINTENANCE_DB)
        .connect()
        .await?;
    let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&catalog_db)
        .fetch_optional(&mut conn)
        .await?;
    if found.is_none() {
        tracing::info!(database = %catalog_db, "catalog database missing, creating");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&catalog_db)))
            .execute(&mut conn)
            .await?;
    }
    conn.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_database_from_url_path() {
        assert_eq!(
            target_database("postgres://u:p@localhost:5432/catalog?sslmode=disable").unwrap(),
            Some("catalog".to_string())
        );
    }

    #[test]
    fn host_only_and_maintenance_urls_have_no_target() {
        assert_eq!(target_database("postgres://localhost").unwrap(), None);
        assert_eq!(target_database("postgres://localhost/postgres").unwrap(), None);
        assert_eq!(target_database("postgres://u:p@db.internal:5432/").unwrap(), None);
    }

    #[test]
    fn malformed_url_is_an_error() {
        assert!(target_database("not a url").is_err());
    }
}
