//! User schema validation.

mod validation;
pub use validation::{FieldRule, RequestValidator, EMAIL, NAME, PASSWORD};
