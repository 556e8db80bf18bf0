//! # prayerhub-api
//!
//! HTTP API layer for PrayerHub built on Axum.
//!
//! Provides the REST endpoints, the admin code guard, CORS and logging
//! middleware, DTOs, and the mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
