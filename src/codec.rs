//! JSON codec for [`Product`]: the boundary mapping used by request and response bodies.
//!
//! Output goes through the derived `Serialize` (`price` as decimal text, `category` as its
//! upper-case name). Input is read by hand so each rejection names the offending attribute.

use crate::error::ValidationError;
use crate::model::{Category, Product};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

pub const BAD_DATA: &str = "Invalid product: body of request contained bad or no data";

/// Produce the JSON mapping of every attribute.
pub fn serialize(product: &Product) -> serde_json::Result<Value> {
    serde_json::to_value(product)
}

/// Populate `product` from a JSON mapping. `id` is never read from the body.
///
/// On error `product` is left untouched.
pub fn deserialize(product: &mut Product, data: &Value) -> Result<(), ValidationError> {
    let map = data.as_object().ok_or_else(|| ValidationError::new(BAD_DATA))?;

    let name = match required(map, "name")? {
        Value::String(s) => s.clone(),
        other => return Err(type_error("string", "name", other)),
    };
    let description = match map.get("description") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(type_error("string", "description", other)),
    };
    let price = parse_price(required(map, "price")?)?;
    let available = match required(map, "available")? {
        Value::Bool(b) => *b,
        other => return Err(type_error("boolean", "available", other)),
    };
    let category = match required(map, "category")? {
        Value::String(s) => Category::from_str(s)?,
        other => return Err(ValidationError::new(format!("Invalid attribute: {}", other))),
    };

    product.name = name;
    product.description = description;
    product.price = price;
    product.available = available;
    product.category = category;
    Ok(())
}

/// Build a fresh product (no id) from a JSON mapping.
pub fn from_json(data: &Value) -> Result<Product, ValidationError> {
    let mut product = Product::default();
    deserialize(&mut product, data)?;
    Ok(product)
}

/// Normalize a price supplied as a JSON number or string into a decimal.
///
/// Strings are trimmed and may carry one pair of surrounding double quotes.
pub fn parse_price(value: &Value) -> Result<Decimal, ValidationError> {
    match value {
        Value::String(s) => parse_price_str(s),
        Value::Number(n) => parse_price_str(&n.to_string()),
        other => Err(type_error("decimal", "price", other)),
    }
}

pub fn parse_price_str(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();
    Decimal::from_str(unquoted)
        .or_else(|_| Decimal::from_scientific(unquoted))
        .map_err(|_| ValidationError::new(format!("Invalid attribute: price '{}'", raw)))
}

fn required<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ValidationError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(ValidationError::new(format!("Invalid product: missing {}", key))),
        Some(v) => Ok(v),
    }
}

fn type_error(expected: &str, key: &str, got: &Value) -> ValidationError {
    ValidationError::new(format!(
        "Invalid type for {} [{}]: {}",
        expected,
        key,
        json_type_name(got)
    ))
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
