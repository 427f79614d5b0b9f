//! HTTP handlers for the user resource.

pub mod user;
pub use user::*;
