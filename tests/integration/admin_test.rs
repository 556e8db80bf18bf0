//! Admin endpoints over HTTP.

use http::StatusCode;

use crate::helpers::{ADMIN_CODE, TestApp};

#[tokio::test]
async fn test_admin_routes_require_code() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/admin/stats", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let wrong = app
        .request("GET", "/api/admin/stats", None, Some("guess"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let right = app
        .request("GET", "/api/admin/stats", None, Some(ADMIN_CODE))
        .await;
    assert_eq!(right.status, StatusCode::OK);
}

#[tokio::test]
async fn test_verify() {
    let app = TestApp::new();

    let ok = app
        .request(
            "POST",
            "/api/admin/verify",
            Some(serde_json::json!({ "code": ADMIN_CODE })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let wrong = app
        .request(
            "POST",
            "/api/admin/verify",
            Some(serde_json::json!({ "code": "nope" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let empty = app
        .request(
            "POST",
            "/api/admin/verify",
            Some(serde_json::json!({ "code": "" })),
            None,
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_reflect_registrations() {
    let app = TestApp::new();
    let slots = app.slot_ids("2025-09-08").await;
    app.register("a", &slots[0]).await;
    app.register("a", &slots[1]).await;
    app.register("b", &slots[0]).await;

    let response = app
        .request("GET", "/api/admin/stats", None, Some(ADMIN_CODE))
        .await;

    let data = &response.body["data"];
    assert_eq!(data["totalRegistrations"], 3);
    assert_eq!(data["totalUsers"], 2);
    assert_eq!(data["parishStats"]["3 교구"], 3);
}

#[tokio::test]
async fn test_global_settings_round_trip() {
    let app = TestApp::new();

    let current = app
        .request("GET", "/api/admin/global-settings", None, Some(ADMIN_CODE))
        .await;
    assert_eq!(current.body["data"]["maxParticipants"], 10);

    let rejected = app
        .request(
            "PUT",
            "/api/admin/global-settings",
            Some(serde_json::json!({ "maxParticipants": 0 })),
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let updated = app
        .request(
            "PUT",
            "/api/admin/global-settings",
            Some(serde_json::json!({ "maxParticipants": 15 })),
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["maxParticipants"], 15);

    let slots = app
        .request("GET", "/api/slots?date=2025-09-08", None, None)
        .await;
    assert_eq!(slots.body["data"][0]["max_participants"], 15);
}

#[tokio::test]
async fn test_slot_registrants() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    app.register("김철수", &slot).await;
    app.register("이영희", &slot).await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/slots/{slot}/registrations"),
            None,
            Some(ADMIN_CODE),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["김철수", "이영희"]);

    let listed = app
        .request(
            "GET",
            "/api/admin/slots?date=2025-09-08",
            None,
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(listed.body["data"][0]["current_participants"], 2);
}
