//! Request extractors shared by handlers.

pub mod json_body;

pub use json_body::{JsonBody, JSON_CONTENT_TYPE};
