//! Pre-store checks on a decoded product.

use crate::error::ValidationError;
use crate::model::Product;

pub struct ProductValidator;

impl ProductValidator {
    /// Attributes every stored product must carry.
    pub fn validate(product: &Product) -> Result<(), ValidationError> {
        if product.name.trim().is_empty() {
            return Err(ValidationError::new("Invalid product: name must not be empty"));
        }
        Ok(())
    }

    /// Update needs an id to identify the target row.
    pub fn validate_for_update(product: &Product) -> Result<i64, ValidationError> {
        let id = product
            .id
            .ok_or_else(|| ValidationError::new("Update called with empty ID field"))?;
        Self::validate(product)?;
        Ok(id)
    }
}
