//! Route definitions for the PrayerHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(slot_routes())
        .merge(registration_routes())
        .merge(user_routes())
        .merge(admin_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Public slot listing
fn slot_routes() -> Router<AppState> {
    Router::new().route("/slots", get(handlers::slot::list_slots))
}

/// Admission and cancellation
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::registration::register))
        .route("/cancel", post(handlers::registration::cancel))
}

/// Registrant lookup and listing
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/lookup", post(handlers::user::lookup))
        .route(
            "/users/{id}/registrations",
            get(handlers::user::registrations),
        )
}

/// Admin dashboard
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/verify", post(handlers::admin::verify))
        .route("/admin/stats", get(handlers::admin::stats))
        .route(
            "/admin/global-settings",
            get(handlers::admin::get_global_settings).put(handlers::admin::update_global_settings),
        )
        .route("/admin/slots", get(handlers::admin::list_slots))
        .route(
            "/admin/slots/{id}/registrations",
            get(handlers::admin::slot_registrations),
        )
}
