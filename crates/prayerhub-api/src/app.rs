//! Application builder: wires stores, services and the router into an
//! Axum app.

use std::sync::Arc;

use axum::Router;

use prayerhub_core::config::AppConfig;
use prayerhub_core::traits::Clock;
use prayerhub_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over `stores`.
pub fn build_app(config: AppConfig, stores: Stores, clock: Arc<dyn Clock>) -> Router {
    build_router(AppState::new(config, stores, clock))
}
