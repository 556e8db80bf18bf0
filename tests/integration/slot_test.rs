//! Slot listing over HTTP.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_weekday_slots_are_created_on_first_view() {
    let app = TestApp::new();

    let first = app.slot_ids("2025-09-08").await;
    assert_eq!(first.len(), 12);

    let second = app.slot_ids("2025-09-08").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_slot_rows_carry_capacity() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/slots?date=2025-09-09", None, None)
        .await;

    let first = &response.body["data"][0];
    assert_eq!(first["start_time"], "07:00:00");
    assert_eq!(first["end_time"], "08:00:00");
    assert_eq!(first["max_participants"], 10);
    assert_eq!(first["current_participants"], 0);
    assert_eq!(first["available_spots"], 10);
}

#[tokio::test]
async fn test_weekend_is_empty() {
    let app = TestApp::new();
    assert!(app.slot_ids("2025-09-13").await.is_empty());
}

#[tokio::test]
async fn test_date_errors() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/slots", None, None).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request("GET", "/api/slots?date=09-08-2025", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let outside = app
        .request("GET", "/api/slots?date=2025-10-01", None, None)
        .await;
    assert_eq!(outside.status, StatusCode::BAD_REQUEST);
    assert_eq!(outside.error_code(), "VALIDATION_ERROR");
}
