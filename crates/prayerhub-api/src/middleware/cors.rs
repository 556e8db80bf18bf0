//! CORS layer for the registration frontend.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use prayerhub_core::config::CorsConfig;

/// Builds a CORS layer from configuration. `"*"` in a list allows anything.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(parse_all::<Method>("method", &config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age_seconds));

    let layer = if is_wildcard(&config.allowed_origins) {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parse_all::<HeaderValue>("origin", &config.allowed_origins))
    };

    if is_wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_all::<HeaderName>("header", &config.allowed_headers))
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Parse every entry, skipping (and logging) the ones that do not parse.
fn parse_all<T: FromStr>(what: &'static str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|raw| match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(kind = what, value = %raw, "Ignoring invalid CORS entry");
                None
            }
        })
        .collect()
}
