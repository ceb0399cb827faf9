mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_stats_fresh_link() {
    let server = common::make_server();
    let token = common::create_open_link(&server, "https://example.com").await;

    let response = server.get(&format!("/links/{token}/stats")).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["shortenedUrl"], token);
    assert_eq!(json["originalUrl"], "https://example.com");
    assert_eq!(json["clicks"], 0);
    assert_eq!(json["isValid"], true);
    assert!(json["createdAt"].is_string());
    assert!(json["expirationDate"].is_null());
}

#[tokio::test]
async fn test_stats_reports_expiration() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "expirationDate": "2099-01-01T00:00:00Z"
        }),
    )
    .await;

    let json = server
        .get(&format!("/links/{token}/stats"))
        .await
        .json::<Value>();

    let expiration: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(json["expirationDate"].clone()).unwrap();
    assert_eq!(expiration.to_rfc3339(), "2099-01-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_stats_do_not_require_secret() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({ "originalUrl": "https://example.com", "password": "secure123" }),
    )
    .await;

    server
        .get(&format!("/links/{token}/stats"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_stats_available_for_expired_link() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "expirationDate": "2000-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server.get(&format!("/links/{token}/stats")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["clicks"], 0);
}

#[tokio::test]
async fn test_stats_not_found() {
    let server = common::make_server();

    let response = server.get("/links/0000000000/stats").await;

    response.assert_status_not_found();
}
