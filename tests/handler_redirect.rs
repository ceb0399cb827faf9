mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_redirect_success() {
    let server = common::make_server();
    let token = common::create_open_link(&server, "https://example.com/target").await;

    let response = server.get(&format!("/links/{token}")).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::make_server();

    let response = server.get("/links/ffffffffff").await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "The link does not exist.");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let server = common::make_server();
    let token = common::create_open_link(&server, "https://example.com").await;

    for _ in 0..3 {
        server
            .get(&format!("/links/{token}"))
            .await
            .assert_status(StatusCode::FOUND);
    }

    assert_eq!(common::clicks(&server, &token).await, 3);
}

#[tokio::test]
async fn test_redirect_protected_link() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({ "originalUrl": "https://example.com/private", "password": "secure123" }),
    )
    .await;

    let missing = server.get(&format!("/links/{token}")).await;
    missing.assert_status(StatusCode::FORBIDDEN);
    let json = missing.json::<Value>();
    assert_eq!(json["error"]["details"]["reason"], "secret_required");
    assert_eq!(
        json["error"]["message"],
        "This link is protected. Please provide the secret."
    );

    let wrong = server
        .get(&format!("/links/{token}"))
        .add_query_param("password", "wrong")
        .await;
    wrong.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        wrong.json::<Value>()["error"]["details"]["reason"],
        "incorrect_secret"
    );

    let correct = server
        .get(&format!("/links/{token}"))
        .add_query_param("password", "secure123")
        .await;
    correct.assert_status(StatusCode::FOUND);
    assert_eq!(correct.header("location"), "https://example.com/private");

    assert_eq!(common::clicks(&server, &token).await, 1);
}

#[tokio::test]
async fn test_redirect_accepts_secret_query_alias() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({ "originalUrl": "https://example.com", "password": "secure123" }),
    )
    .await;

    server
        .get(&format!("/links/{token}"))
        .add_query_param("secret", "secure123")
        .await
        .assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_redirect_empty_secret_counts_as_missing() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({ "originalUrl": "https://example.com", "password": "secure123" }),
    )
    .await;

    let response = server
        .get(&format!("/links/{token}"))
        .add_query_param("password", "")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["reason"],
        "secret_required"
    );
}

#[tokio::test]
async fn test_redirect_expired_link_ignores_secret() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({
            "originalUrl": "https://example.com",
            "password": "secure123",
            "expirationDate": "2000-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server
        .get(&format!("/links/{token}"))
        .add_query_param("password", "secure123")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "This link has expired."
    );
    assert_eq!(common::clicks(&server, &token).await, 0);
}

#[tokio::test]
async fn test_redirect_failed_attempts_do_not_count() {
    let server = common::make_server();
    let token = common::create_link(
        &server,
        json!({ "originalUrl": "https://example.com", "password": "secure123" }),
    )
    .await;

    server.get(&format!("/links/{token}")).await;
    server
        .get(&format!("/links/{token}"))
        .add_query_param("password", "nope")
        .await;

    assert_eq!(common::clicks(&server, &token).await, 0);
}
