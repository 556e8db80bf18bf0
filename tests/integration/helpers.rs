//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use prayerhub_core::config::{AppConfig, RegistrationWindow};
use prayerhub_core::traits::Clock;
use prayerhub_database::{MemoryStore, Stores};

/// Administrator code configured for every test app.
pub const ADMIN_CODE: &str = "test-admin-code";

/// Clock frozen at a fixed instant. Sleeps only yield.
#[derive(Debug)]
pub struct FrozenClock(pub DateTime<Utc>);

#[async_trait]
impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for seeding and direct inspection
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a test application whose clock reads a week before the window opens.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap())
    }

    /// Create a test application whose clock reads `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        let mut config = AppConfig::default();
        config.admin.code = ADMIN_CODE.to_string();
        config.registration.window = Some(RegistrationWindow {
            start: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 9, 26).unwrap(),
        });

        let store = MemoryStore::new();
        let router = prayerhub_api::build_app(
            config,
            Stores::memory(store.clone()),
            Arc::new(FrozenClock(now)),
        );

        Self { router, store }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        admin_code: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(code) = admin_code {
            req = req.header("x-admin-code", code);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// List the slots of `date`, materializing them, and return their ids.
    pub async fn slot_ids(&self, date: &str) -> Vec<String> {
        let response = self
            .request("GET", &format!("/api/slots?date={date}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

        response.body["data"]
            .as_array()
            .expect("slot list")
            .iter()
            .map(|s| s["id"].as_str().expect("slot id").to_string())
            .collect()
    }

    /// Register `name` for `slot_id`.
    pub async fn register(&self, name: &str, slot_id: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "userInfo": {
                    "name": name,
                    "parish": "3 교구",
                    "phone_last_4": "1234",
                },
                "slotId": slot_id,
            })),
            None,
        )
        .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
