//! Custom Axum extractors.

pub mod admin;
pub mod json;

pub use admin::AdminGuard;
pub use json::ValidatedJson;
