//! Registrant lookup and listing over HTTP.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_lookup_after_registration() {
    let app = TestApp::new();
    let slot = app.slot_ids("2025-09-08").await.remove(0);
    let registered = app.register("김철수", &slot).await;

    let response = app
        .request(
            "POST",
            "/api/users/lookup",
            Some(serde_json::json!({
                "name": " 김철수 ",
                "parish": "3 교구",
                "phone_last_4": "1234",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["userId"], registered.body["data"]["userId"]);
}

#[tokio::test]
async fn test_lookup_unknown_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/users/lookup",
            Some(serde_json::json!({
                "name": "아무개",
                "parish": "기타",
                "phone_last_4": "0000",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registrations_are_listed_in_slot_order() {
    let app = TestApp::new();
    let slots = app.slot_ids("2025-09-08").await;
    app.register("김철수", &slots[3]).await;
    let registered = app.register("김철수", &slots[0]).await;
    let user_id = registered.body["data"]["userId"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/users/{user_id}/registrations"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["slot_id"], slots[0].as_str());
    assert_eq!(rows[1]["slot_id"], slots[3].as_str());
    assert_eq!(rows[0]["is_completed"], false);
}

#[tokio::test]
async fn test_registrations_of_unknown_user() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            &format!("/api/users/{}/registrations", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
