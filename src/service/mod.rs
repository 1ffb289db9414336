//! CatalogService: product operations over a `ProductStore`.

mod catalog;
mod validation;
pub use catalog::{not_found, CatalogService};
pub use validation::ProductValidator;
