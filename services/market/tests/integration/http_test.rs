use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{bearer_for, test_server};

#[tokio::test]
async fn should_serve_health_without_auth() {
    let (server, _state) = test_server();

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_echo_request_id_on_responses() {
    let (server, _state) = test_server();

    let response = server.get("/healthz").await;

    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn should_reject_garbage_tokens() {
    let (server, _state) = test_server();

    let response = server
        .get("/api/cart")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "unauthorized");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn should_accept_tokens_with_unknown_role_claims() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("superuser"));

    // Unknown role degrades to no role: authenticated, not admin.
    server
        .get("/api/cart")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    server
        .get("/api/reports/summary")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
