//! Product entity and its category tags.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::Product;
