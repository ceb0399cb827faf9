#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use linkgate::api::handlers::health_handler;
use linkgate::api::routes::{management_routes, public_routes};
use linkgate::application::services::LinkServiceConfig;
use linkgate::infrastructure::persistence::InMemoryLinkRepository;
use linkgate::state::AppState;

pub const BASE_URL: &str = "http://s.example.com";

/// Lowest Argon2 time cost, keeps hashing fast in tests.
pub const TEST_HASH_COST: u32 = 1;

pub fn test_config() -> LinkServiceConfig {
    LinkServiceConfig {
        base_url: BASE_URL.to_string(),
        hash_cost: TEST_HASH_COST,
    }
}

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(InMemoryLinkRepository::new()), test_config())
}

/// Test server with every link route and `/health`, without rate limiting.
pub fn make_server() -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(public_routes())
        .merge(management_routes())
        .with_state(create_test_state());

    TestServer::new(app).unwrap()
}

/// Creates a link through the API and returns its token.
pub async fn create_link(server: &TestServer, body: Value) -> String {
    let response = server.post("/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["shortenedUrl"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn create_open_link(server: &TestServer, url: &str) -> String {
    create_link(server, json!({ "originalUrl": url })).await
}

pub async fn clicks(server: &TestServer, token: &str) -> i64 {
    server.get(&format!("/links/{token}/stats")).await.json::<Value>()["clicks"]
        .as_i64()
        .unwrap()
}
