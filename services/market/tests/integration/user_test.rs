use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{bearer_for, seller_card_body, test_server};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_caller_subject() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/users")
        .authorization_bearer(&token)
        .json(&json!({"email": "ada@example.com", "name": "Ada"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered");

    let user: Value = server
        .get("/api/users/u1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(user["id"], "u1");
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "buyer");
    assert_eq!(user["provider"], "password");
}

#[tokio::test]
async fn should_list_missing_registration_fields() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/users")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing required fields: email, name");
}

// ── GET /api/users/{user_id} ─────────────────────────────────────────────────

#[tokio::test]
async fn should_scope_profile_reads_to_self_or_admin() {
    let (server, _state) = test_server();
    let owner = bearer_for("u1", None);
    server
        .post("/api/users")
        .authorization_bearer(&owner)
        .json(&json!({"email": "ada@example.com", "name": "Ada"}))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .get("/api/users/u1")
        .authorization_bearer(&bearer_for("u2", None))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .get("/api/users/u1")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .assert_status_ok();
    server
        .get("/api/users/ghost")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ── DELETE /api/users/{user_id} ──────────────────────────────────────────────

#[tokio::test]
async fn should_cascade_seller_and_revoke_token_on_delete() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("seller"));
    server
        .post("/api/users")
        .authorization_bearer(&token)
        .json(&json!({"email": "ada@example.com", "name": "Ada", "role": "seller"}))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/sellers")
        .authorization_bearer(&token)
        .json(&seller_card_body("Vinyl Corner", "music"))
        .await
        .assert_status(StatusCode::CREATED);
    let product: Value = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({"name": "LP", "price": 25.0}))
        .await
        .json();
    let product_id = product["id"].as_str().unwrap().to_owned();

    let response = server
        .delete("/api/users/u1")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User deleted");

    // The token dies with the account.
    server
        .get("/api/cart")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let admin = bearer_for("root", Some("admin"));
    server
        .get("/api/users/u1")
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/products/{product_id}"))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/sellers/u1")
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_forbid_deleting_other_users() {
    let (server, _state) = test_server();
    let owner = bearer_for("u1", None);
    server
        .post("/api/users")
        .authorization_bearer(&owner)
        .json(&json!({"email": "ada@example.com", "name": "Ada"}))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete("/api/users/u1")
        .authorization_bearer(&bearer_for("u2", None))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
