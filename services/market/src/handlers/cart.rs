use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::domain::types::{CartLine, Price};
use crate::error::MarketServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::cart::{
    AddToCartInput, AddToCartUseCase, RemoveFromCartUseCase, RetrieveCartUseCase,
};

// ── POST /api/cart/add ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    /// Older clients send the product id under `id`.
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub seller: Option<String>,
}

pub async fn add_to_cart(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<MessageResponse>, MarketServiceError> {
    let Some(product_id) = body.product_id.or(body.id) else {
        return Err(MarketServiceError::MissingFields("productId".to_owned()));
    };
    let usecase = AddToCartUseCase { store: state.store };
    usecase
        .execute(
            caller.user_id(),
            AddToCartInput {
                product_id,
                name: body.name,
                price: body.price,
                image: body.image,
                seller: body.seller,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("Item added to cart")))
}

// ── POST /api/cart/remove ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartResponse {
    pub message: String,
    pub updated_items: Vec<CartLine>,
}

pub async fn remove_from_cart(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<RemoveFromCartRequest>,
) -> Result<Json<RemoveFromCartResponse>, MarketServiceError> {
    let Some(product_id) = body.product_id else {
        return Err(MarketServiceError::MissingFields("productId".to_owned()));
    };
    let usecase = RemoveFromCartUseCase { store: state.store };
    let cart = usecase.execute(caller.user_id(), &product_id).await?;
    Ok(Json(RemoveFromCartResponse {
        message: "Item removed from cart".to_owned(),
        updated_items: cart.items,
    }))
}

// ── GET /api/cart ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
}

pub async fn get_cart(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, MarketServiceError> {
    let usecase = RetrieveCartUseCase { store: state.store };
    let cart = usecase.execute(caller.user_id()).await?;
    Ok(Json(CartResponse { items: cart.items }))
}
