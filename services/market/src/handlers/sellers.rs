use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::Caller;
use crate::domain::types::SellerCard;
use crate::error::MarketServiceError;
use crate::handlers::{LimitQuery, MessageResponse};
use crate::state::AppState;
use crate::usecase::seller::{
    DeleteSellerCardUseCase, GetSellerUseCase, LatestSellersUseCase, ListSellersUseCase,
    SellerCardInput, UpsertSellerCardUseCase,
};

// ── POST /api/sellers (alias /api/seller/card) ───────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerCardRequest {
    pub color: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub text_color: Option<String>,
    pub title: Option<String>,
}

pub async fn upsert_seller_card(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<SellerCardRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), MarketServiceError> {
    let usecase = UpsertSellerCardUseCase { store: state.store };
    let output = usecase
        .execute(
            caller.user_id(),
            SellerCardInput {
                color: body.color,
                description: body.description,
                genre: body.genre,
                image: body.image,
                text_color: body.text_color,
                title: body.title,
            },
        )
        .await?;
    if output.created {
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Seller card created")),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Seller card updated")),
        ))
    }
}

// ── DELETE /api/seller/card ──────────────────────────────────────────────────

pub async fn delete_seller_card(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, MarketServiceError> {
    let usecase = DeleteSellerCardUseCase { store: state.store };
    usecase.execute(caller.user_id()).await?;
    Ok(Json(MessageResponse::new("Seller card deleted")))
}

// ── GET /api/sellers ─────────────────────────────────────────────────────────

pub async fn list_sellers(
    _caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<SellerCard>>, MarketServiceError> {
    let usecase = ListSellersUseCase { store: state.store };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/sellers/latest ──────────────────────────────────────────────────

pub async fn latest_sellers(
    _caller: Caller,
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SellerCard>>, MarketServiceError> {
    let usecase = LatestSellersUseCase { store: state.store };
    Ok(Json(usecase.execute(query.or_default()).await?))
}

// ── GET /api/sellers/{user_id} ───────────────────────────────────────────────

pub async fn get_seller(
    _caller: Caller,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SellerCard>, MarketServiceError> {
    let usecase = GetSellerUseCase { store: state.store };
    Ok(Json(usecase.execute(&user_id).await?))
}
