use axum::http::StatusCode;
use serde_json::{Value, json};

use mercato_store::DocumentStore;

use crate::helpers::{bearer_for, seller_card_body, test_server};

// ── POST /api/sellers ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_then_update_seller_card() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("seller"));

    let created = server
        .post("/api/sellers")
        .authorization_bearer(&token)
        .json(&seller_card_body("Vinyl Corner", "music"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["message"], "Seller card created");

    let updated = server
        .post("/api/seller/card")
        .authorization_bearer(&token)
        .json(&seller_card_body("Wax Palace", "jazz"))
        .await;
    updated.assert_status_ok();
    let body: Value = updated.json();
    assert_eq!(body["message"], "Seller card updated");

    let card: Value = server
        .get("/api/sellers/u1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(card["title"], "Wax Palace");
    assert_eq!(card["genre"], "jazz");
    assert_eq!(card["userId"], "u1");
}

#[tokio::test]
async fn should_list_missing_card_fields() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("seller"));

    let response = server
        .post("/api/sellers")
        .authorization_bearer(&token)
        .json(&json!({"title": "Vinyl Corner", "genre": "music"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "missing required fields: color, description, image, textColor"
    );
}

#[tokio::test]
async fn should_propagate_card_update_onto_products() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("seller"));
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
    assert_eq!(product["Seller"], "Vinyl Corner");

    server
        .post("/api/sellers")
        .authorization_bearer(&token)
        .json(&seller_card_body("Wax Palace", "jazz"))
        .await
        .assert_status_ok();

    let product: Value = server
        .get(&format!("/api/products/{product_id}"))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(product["Seller"], "Wax Palace");
    assert_eq!(product["genre"], "jazz");
}

// ── DELETE /api/seller/card ──────────────────────────────────────────────────

#[tokio::test]
async fn should_cascade_product_deletion_with_card() {
    let (server, _state) = test_server();
    let token = bearer_for("u1", Some("seller"));
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
        .delete("/api/seller/card")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Seller card deleted");
    server
        .get("/api/sellers/u1")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/products/{product_id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ── GET /api/sellers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_and_limit_latest_sellers() {
    let (server, state) = test_server();
    let token = bearer_for("viewer", None);
    for (i, user_id) in ["u1", "u2", "u3"].iter().enumerate() {
        let card = json!({
            "color": "#000",
            "description": "d",
            "genre": "music",
            "image": "i",
            "textColor": "#fff",
            "title": format!("shop {user_id}"),
            "userId": user_id,
            "createdAt": format!("2026-01-0{}T00:00:00.000Z", i + 1),
            "updatedAt": format!("2026-01-0{}T00:00:00.000Z", i + 1),
        });
        state
            .store
            .set("sellers", user_id, card.as_object().cloned().unwrap())
            .await
            .unwrap();
    }

    let all: Vec<Value> = server
        .get("/api/sellers")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(all.len(), 3);

    let latest: Vec<Value> = server
        .get("/api/sellers/latest?limit=2")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0]["userId"], "u3");
    assert_eq!(latest[1]["userId"], "u2");
}
