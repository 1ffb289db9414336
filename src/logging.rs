//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVES: &str = "product_catalog=info,catalog_server=info,tower_http=info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
        )
        .init();
}
