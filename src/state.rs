//! Shared application state for all routes.

use crate::store::{MemoryProductStore, ProductStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryProductStore::new()))
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}
