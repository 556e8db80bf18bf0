//! Registration and cancellation over HTTP.

use chrono::{TimeZone, Utc};
use http::StatusCode;

use crate::helpers::{ADMIN_CODE, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);

    let response = app.register("김철수", &slot).await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["registration"]["slot_id"], slot.as_str());
    assert!(response.body["data"]["userId"].is_string());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    app.register("김철수", &slot).await;

    let response = app.register("김철수", &slot).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "DUPLICATE_REGISTRATION");
}

#[tokio::test]
async fn test_unknown_slot_is_not_found() {
    let app = TestApp::new();
    let response = app
        .register("김철수", &uuid::Uuid::new_v4().to_string())
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "SLOT_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_identity_is_rejected() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "userInfo": { "name": "김철수", "parish": "3 교구", "phone_last_4": "12a4" },
                "slotId": slot,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "userInfo": { "name": "", "parish": "3 교구", "phone_last_4": "1234" },
                "slotId": slot,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "모든 필수 정보를 입력해주세요.");
}

#[tokio::test]
async fn test_full_slot_conflicts() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    let update = app
        .request(
            "PUT",
            "/api/admin/global-settings",
            Some(serde_json::json!({ "maxParticipants": 2 })),
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    assert_eq!(app.register("a", &slot).await.status, StatusCode::OK);
    assert_eq!(app.register("b", &slot).await.status, StatusCode::OK);

    let third = app.register("c", &slot).await;
    assert_eq!(third.status, StatusCode::CONFLICT);
    assert_eq!(third.error_code(), "SLOT_FULL");
}

#[tokio::test]
async fn test_lowering_capacity_keeps_existing_registrations() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    for name in ["a", "b", "c"] {
        assert_eq!(app.register(name, &slot).await.status, StatusCode::OK);
    }

    let update = app
        .request(
            "PUT",
            "/api/admin/global-settings",
            Some(serde_json::json!({ "maxParticipants": 2 })),
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    let registrants = app
        .request(
            "GET",
            &format!("/api/admin/slots/{slot}/registrations"),
            None,
            Some(ADMIN_CODE),
        )
        .await;
    assert_eq!(registrants.body["data"].as_array().unwrap().len(), 3);

    let listed = app
        .request("GET", "/api/slots?date=2025-09-08", None, None)
        .await;
    assert_eq!(listed.body["data"][0]["current_participants"], 3);
    assert_eq!(listed.body["data"][0]["available_spots"], 0);

    let fourth = app.register("d", &slot).await;
    assert_eq!(fourth.status, StatusCode::CONFLICT);
    assert_eq!(fourth.error_code(), "SLOT_FULL");
}

#[tokio::test]
async fn test_cancel_then_cancel_again() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    let registered = app.register("김철수", &slot).await;
    let body = serde_json::json!({
        "registrationId": registered.body["data"]["registration"]["id"],
        "userId": registered.body["data"]["userId"],
    });

    let first = app
        .request("POST", "/api/cancel", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);

    let second = app.request("POST", "/api/cancel", Some(body), None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.error_code(), "REGISTRATION_NOT_FOUND");
}

#[tokio::test]
async fn test_cancel_started_slot_is_rejected() {
    // 2025-09-08 10:00 KST: the 07:00 slot has started.
    let app = TestApp::at(Utc.with_ymd_and_hms(2025, 9, 8, 1, 0, 0).unwrap());
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    let registered = app.register("김철수", &slot).await;
    assert_eq!(registered.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/cancel",
            Some(serde_json::json!({
                "registrationId": registered.body["data"]["registration"]["id"],
                "userId": registered.body["data"]["userId"],
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "SLOT_ALREADY_PASSED");

    let user_id = registered.body["data"]["userId"].as_str().unwrap();
    let listed = app
        .request("GET", &format!("/api/users/{user_id}/registrations"), None, None)
        .await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_with_malformed_ids_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/cancel",
            Some(serde_json::json!({ "registrationId": "nope", "userId": "nope" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_registrations_never_duplicate() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);

    let attempts = (0..6).map(|_| app.register("김철수", &slot));
    let responses = futures::future::join_all(attempts).await;

    let ok = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    assert_eq!(ok, 1);
    assert!(
        responses
            .iter()
            .filter(|r| r.status != StatusCode::OK)
            .all(|r| r.status == StatusCode::CONFLICT)
    );
}
