//! The catalog entity.

use super::Category;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A catalog product. `id` is `None` until the store assigns one on create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            available: true,
            category: Category::Unknown,
        }
    }
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// True when every client-supplied attribute matches; `id` is ignored.
    pub fn same_attributes(&self, other: &Product) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.price == other.price
            && self.available == other.available
            && self.category == other.category
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}
