//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Log method, path, status and latency once the response is ready.
///
/// Query strings are left out; admin credentials travel in a header and
/// are never logged.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let admin = path.starts_with("/api/admin");
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), latency_ms, admin, "Request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), latency_ms, admin, "Request served");
    }

    response
}
