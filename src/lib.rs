//! Product catalog: a CRUD REST service for catalog products backed by PostgreSQL.

pub mod codec;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError, UnknownCategory, ValidationError};
pub use model::{Category, Product};
pub use routes::{app, common_routes, product_routes};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_products_table, MemoryProductStore, PgProductStore, ProductStore,
};
