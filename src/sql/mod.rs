//! Safe SQL builder: identifiers from `ProductColumn` only, values as parameters.

mod builder;
pub use builder::*;
pub(crate) use builder::quoted;
