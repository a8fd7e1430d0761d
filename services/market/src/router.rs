use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use mercato_core::health::{healthz, readyz};
use mercato_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    cart::{add_to_cart, get_cart, remove_from_cart},
    orders::{get_order, list_orders, place_order},
    products::{create_product, delete_product, get_product, list_products, update_product},
    reports::{latest_orders, monthly_performance, sales_summary, top_sellers},
    sellers::{delete_seller_card, get_seller, latest_sellers, list_sellers, upsert_seller_card},
    users::{create_user, delete_user, get_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Cart
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/remove", post(remove_from_cart))
        .route("/api/cart", get(get_cart))
        .route("/api/cart/retrieve", get(get_cart))
        // Orders
        .route("/api/orders", post(place_order))
        .route("/api/orders", get(list_orders))
        .route("/api/orders/{order_id}", get(get_order))
        // Sellers
        .route("/api/sellers", post(upsert_seller_card))
        .route("/api/sellers", get(list_sellers))
        .route("/api/sellers/latest", get(latest_sellers))
        .route("/api/sellers/{user_id}", get(get_seller))
        .route("/api/seller/card", post(upsert_seller_card))
        .route("/api/seller/card", delete(delete_seller_card))
        // Users
        .route("/api/users", post(create_user))
        .route("/api/users/{user_id}", get(get_user))
        .route("/api/users/{user_id}", delete(delete_user))
        // Products
        .route("/api/products", post(create_product))
        .route("/api/products", get(list_products))
        .route("/api/products/{product_id}", get(get_product))
        .route("/api/products/{product_id}", put(update_product))
        .route("/api/products/{product_id}", delete(delete_product))
        // Reports
        .route("/api/reports/summary", get(sales_summary))
        .route("/api/reports/monthly", get(monthly_performance))
        .route("/api/reports/top-sellers", get(top_sellers))
        .route("/api/reports/latest-orders", get(latest_orders))
        // Innermost to outermost: the id is set first, traced requests
        // carry it, and responses echo it back.
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
