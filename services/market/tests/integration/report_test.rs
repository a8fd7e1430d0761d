use axum::http::StatusCode;
use chrono::{DateTime, Months, SecondsFormat, Utc};
use serde_json::{Value, json};

use mercato_market::state::AppState;
use mercato_store::DocumentStore;

use crate::helpers::{bearer_for, seed_product, test_server};

async fn seed_order(state: &AppState, id: &str, created_at: DateTime<Utc>, items: Value) {
    let doc = json!({
        "id": id,
        "userId": "u1",
        "items": items,
        "status": "Pending",
        "createdAt": created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    state
        .store
        .set("orders", id, doc.as_object().cloned().unwrap())
        .await
        .unwrap();
}

fn item(seller: &str, price: Value, quantity: i64) -> Value {
    json!({
        "productId": "p",
        "name": "item",
        "price": price,
        "seller": seller,
        "quantity": quantity,
    })
}

// ── Authorization ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_admin_for_reports() {
    let (server, _state) = test_server();
    let buyer = bearer_for("u1", Some("buyer"));

    for path in [
        "/api/reports/summary",
        "/api/reports/monthly",
        "/api/reports/top-sellers",
        "/api/reports/latest-orders",
    ] {
        let response = server.get(path).authorization_bearer(&buyer).await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["error"], "forbidden");
    }
}

// ── GET /api/reports/summary ─────────────────────────────────────────────────

#[tokio::test]
async fn should_summarize_marketplace_activity() {
    let (server, state) = test_server();
    seed_product(
        &state,
        "p1",
        "LP",
        json!("R25.00"),
        "s1",
        "Vinyl Corner",
        Some(5),
    )
    .await;
    let buyer = bearer_for("u1", None);
    server
        .post("/api/users")
        .authorization_bearer(&buyer)
        .json(&json!({"email": "ada@example.com", "name": "Ada"}))
        .await
        .assert_status(StatusCode::CREATED);
    for _ in 0..2 {
        server
            .post("/api/cart/add")
            .authorization_bearer(&buyer)
            .json(&json!({"productId": "p1"}))
            .await
            .assert_status_ok();
    }
    server
        .post("/api/orders")
        .authorization_bearer(&buyer)
        .json(&json!({}))
        .await
        .assert_status_ok();

    let summary: Value = server
        .get("/api/reports/summary")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .json();

    // One line, quantity 2, at R25.00.
    assert_eq!(summary["totalSales"], 50.0);
    assert_eq!(summary["orderCount"], 1);
    assert_eq!(summary["productCount"], 1);
    assert_eq!(summary["userCount"], 1);
}

// ── GET /api/reports/monthly ─────────────────────────────────────────────────

#[tokio::test]
async fn should_bucket_monthly_totals() {
    let (server, state) = test_server();
    let now = Utc::now();
    seed_order(&state, "o1", now, json!([item("A", json!(10.0), 1)])).await;
    seed_order(
        &state,
        "o2",
        now.checked_sub_months(Months::new(14)).unwrap(),
        json!([item("A", json!(99.0), 1)]),
    )
    .await;

    let buckets: Vec<Value> = server
        .get("/api/reports/monthly")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .json();

    assert_eq!(buckets.len(), 12);
    let total: f64 = buckets.iter().map(|b| b["total"].as_f64().unwrap()).sum();
    assert_eq!(total, 10.0);
    assert_eq!(buckets[11]["total"], 10.0);
}

// ── GET /api/reports/top-sellers ─────────────────────────────────────────────

#[tokio::test]
async fn should_rank_sellers_by_order_lines() {
    let (server, state) = test_server();
    let now = Utc::now();
    seed_order(
        &state,
        "o1",
        now,
        json!([item("A", json!(1.0), 9), item("B", json!(1.0), 1)]),
    )
    .await;
    seed_order(&state, "o2", now, json!([item("A", json!(1.0), 1)])).await;

    let ranked: Vec<Value> = server
        .get("/api/reports/top-sellers")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .json();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["seller"], "A");
    assert_eq!(ranked[0]["items"], 2);
    assert_eq!(ranked[1]["seller"], "B");
    assert_eq!(ranked[1]["items"], 1);
}

// ── GET /api/reports/latest-orders ───────────────────────────────────────────

#[tokio::test]
async fn should_limit_latest_orders() {
    let (server, state) = test_server();
    let base = Utc::now();
    for i in 0..3i64 {
        seed_order(
            &state,
            &format!("o{i}"),
            base + chrono::Duration::minutes(i),
            json!([item("A", json!(1.0), 1)]),
        )
        .await;
    }

    let latest: Vec<Value> = server
        .get("/api/reports/latest-orders?limit=2")
        .authorization_bearer(&bearer_for("root", Some("admin")))
        .await
        .json();

    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0]["id"], "o2");
    assert_eq!(latest[1]["id"], "o1");
}
