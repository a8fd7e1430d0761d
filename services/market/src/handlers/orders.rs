use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Map, Value};

use crate::auth::Caller;
use crate::domain::types::Order;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::order::{GetOrderUseCase, ListOrdersUseCase, PlaceOrderUseCase};

// ── POST /api/orders ─────────────────────────────────────────────────────────

/// The body is free-form order detail (shipping address and the like); the
/// service merges it into the order minus the reserved field names.
pub async fn place_order(
    caller: Caller,
    State(state): State<AppState>,
    Json(details): Json<Map<String, Value>>,
) -> Result<Json<Order>, MarketServiceError> {
    let usecase = PlaceOrderUseCase { store: state.store };
    let order = usecase.execute(caller.user_id(), details).await?;
    Ok(Json(order))
}

// ── GET /api/orders/{order_id} ───────────────────────────────────────────────

pub async fn get_order(
    caller: Caller,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, MarketServiceError> {
    let usecase = GetOrderUseCase { store: state.store };
    let order = usecase.execute(&order_id).await?;
    if order.user_id != caller.user_id() && !caller.is_admin() {
        return Err(MarketServiceError::Forbidden);
    }
    Ok(Json(order))
}

// ── GET /api/orders ──────────────────────────────────────────────────────────

pub async fn list_orders(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, MarketServiceError> {
    let usecase = ListOrdersUseCase { store: state.store };
    let orders = usecase.execute(caller.user_id()).await?;
    Ok(Json(orders))
}
