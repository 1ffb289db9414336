//! Product catalog server.
//!
//! Run from repo root: `cargo run -p catalog-server`
//! Without `DATABASE_URL` the service keeps products in memory.

use product_catalog::{
    app,
    ensure_database_exists,
    ensure_products_table,
    logging,
    AppConfig,
    AppState,
    PgProductStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init_tracing();

    let state = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_products_table(&pool).await?;
            tracing::info!("using PostgreSQL store");
            AppState::new(Arc::new(PgProductStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            AppState::in_memory()
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Product catalog listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
