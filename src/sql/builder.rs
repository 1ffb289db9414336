//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the products table.

use crate::store::PRODUCTS_TABLE;

/// Columns of the products table. Identifiers come only from here; values are always bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductColumn {
    Id,
    Name,
    Description,
    Price,
    Available,
    Category,
}

impl ProductColumn {
    pub const WRITABLE: [ProductColumn; 5] = [
        ProductColumn::Name,
        ProductColumn::Description,
        ProductColumn::Price,
        ProductColumn::Available,
        ProductColumn::Category,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Name => "name",
            ProductColumn::Description => "description",
            ProductColumn::Price => "price",
            ProductColumn::Available => "available",
            ProductColumn::Category => "category",
        }
    }
}

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn table() -> String {
    quoted(PRODUCTS_TABLE)
}

fn select_column_list() -> String {
    std::iter::once(ProductColumn::Id)
        .chain(ProductColumn::WRITABLE)
        .map(|c| quoted(c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn select_all() -> String {
    format!("SELECT {} FROM {} ORDER BY \"id\"", select_column_list(), table())
}

/// SELECT rows where `column` equals the sole bound parameter.
pub fn select_where(column: ProductColumn) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY \"id\"",
        select_column_list(),
        table(),
        quoted(column.name())
    )
}

/// INSERT of every writable column in `WRITABLE` order; returns the new id.
pub fn insert() -> String {
    let cols = ProductColumn::WRITABLE
        .iter()
        .map(|c| quoted(c.name()))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=ProductColumn::WRITABLE.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING \"id\"",
        table(),
        cols,
        placeholders
    )
}

/// UPDATE of every writable column in `WRITABLE` order; id is the last parameter.
pub fn update() -> String {
    let sets = ProductColumn::WRITABLE
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quoted(c.name()), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE \"id\" = ${}",
        table(),
        sets,
        ProductColumn::WRITABLE.len() + 1
    )
}

pub fn delete() -> String {
    format!("DELETE FROM {} WHERE \"id\" = $1", table())
}
