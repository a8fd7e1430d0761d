use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{bearer_for, seed_product, test_server};

// ── POST /api/cart/add ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_bearer_token() {
    let (server, _state) = test_server();

    let response = server
        .post("/api/cart/add")
        .json(&json!({"productId": "p1"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn should_reject_add_without_product_id() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/cart/add")
        .authorization_bearer(&token)
        .json(&json!({"name": "orphan line"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing required fields: productId");
}

#[tokio::test]
async fn should_reject_add_of_unknown_product() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/cart/add")
        .authorization_bearer(&token)
        .json(&json!({"productId": "ghost"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "product not found");
}

#[tokio::test]
async fn should_add_product_and_snapshot_line() {
    let (server, state) = test_server();
    seed_product(
        &state,
        "p1",
        "Blue Note LP",
        json!("R25.00"),
        "s1",
        "Vinyl Corner",
        Some(5),
    )
    .await;
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/cart/add")
        .authorization_bearer(&token)
        .json(&json!({"id": "p1"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Item added to cart");

    let cart = server.get("/api/cart").authorization_bearer(&token).await;
    cart.assert_status_ok();
    let cart: Value = cart.json();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["productId"], "p1");
    assert_eq!(items[0]["name"], "Blue Note LP");
    assert_eq!(items[0]["price"], "R25.00");
    assert_eq!(items[0]["seller"], "Vinyl Corner");
    assert_eq!(items[0]["quantity"], 1);
}

#[tokio::test]
async fn should_accumulate_quantity_on_repeat_add() {
    let (server, state) = test_server();
    seed_product(&state, "p1", "LP", json!(25.0), "s1", "Vinyl Corner", None).await;
    let token = bearer_for("u1", None);

    for _ in 0..3 {
        server
            .post("/api/cart/add")
            .authorization_bearer(&token)
            .json(&json!({"productId": "p1"}))
            .await
            .assert_status_ok();
    }

    let cart: Value = server
        .get("/api/cart/retrieve")
        .authorization_bearer(&token)
        .await
        .json();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
}

// ── POST /api/cart/remove ────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_line_and_return_remaining_items() {
    let (server, state) = test_server();
    seed_product(&state, "p1", "LP", json!(25.0), "s1", "Vinyl Corner", None).await;
    seed_product(&state, "p2", "EP", json!(15.0), "s1", "Vinyl Corner", None).await;
    let token = bearer_for("u1", None);
    for id in ["p1", "p2"] {
        server
            .post("/api/cart/add")
            .authorization_bearer(&token)
            .json(&json!({"productId": id}))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/api/cart/remove")
        .authorization_bearer(&token)
        .json(&json!({"productId": "p1"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Item removed from cart");
    let remaining = body["updatedItems"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["productId"], "p2");
}

#[tokio::test]
async fn should_treat_remove_from_empty_cart_as_noop() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server
        .post("/api/cart/remove")
        .authorization_bearer(&token)
        .json(&json!({"productId": "p1"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["updatedItems"].as_array().unwrap().is_empty());
}

// ── GET /api/cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_read_absent_cart_as_empty() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", None);

    let response = server.get("/api/cart").authorization_bearer(&token).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["items"].as_array().unwrap().is_empty());
}
