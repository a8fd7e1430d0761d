use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::Caller;
use crate::domain::types::{Price, Product};
use crate::error::MarketServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, ProductFilter, UpdateProductInput, UpdateProductUseCase,
};

// ── POST /api/products ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub stock: Option<i64>,
}

pub async fn create_product(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), MarketServiceError> {
    let usecase = CreateProductUseCase { store: state.store };
    let product = usecase
        .execute(
            caller.user_id(),
            CreateProductInput {
                name: body.name,
                price: body.price,
                image: body.image,
                stock: body.stock,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// ── GET /api/products ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub genre: Option<String>,
    pub seller_id: Option<String>,
}

pub async fn list_products(
    _caller: Caller,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, MarketServiceError> {
    let usecase = ListProductsUseCase { store: state.store };
    let products = usecase
        .execute(ProductFilter {
            genre: query.genre,
            seller_id: query.seller_id,
        })
        .await?;
    Ok(Json(products))
}

// ── GET /api/products/{product_id} ───────────────────────────────────────────

pub async fn get_product(
    _caller: Caller,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, MarketServiceError> {
    let usecase = GetProductUseCase { store: state.store };
    Ok(Json(usecase.execute(&product_id).await?))
}

// ── PUT /api/products/{product_id} ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub stock: Option<i64>,
}

pub async fn update_product(
    caller: Caller,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Product>, MarketServiceError> {
    let current = GetProductUseCase {
        store: state.store.clone(),
    }
    .execute(&product_id)
    .await?;
    if current.seller_id != caller.user_id() && !caller.is_admin() {
        return Err(MarketServiceError::Forbidden);
    }

    let usecase = UpdateProductUseCase { store: state.store };
    let product = usecase
        .execute(
            &product_id,
            UpdateProductInput {
                name: body.name,
                price: body.price,
                image: body.image,
                stock: body.stock,
            },
        )
        .await?;
    Ok(Json(product))
}

// ── DELETE /api/products/{product_id} ────────────────────────────────────────

pub async fn delete_product(
    caller: Caller,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, MarketServiceError> {
    let current = GetProductUseCase {
        store: state.store.clone(),
    }
    .execute(&product_id)
    .await?;
    if current.seller_id != caller.user_id() && !caller.is_admin() {
        return Err(MarketServiceError::Forbidden);
    }

    let usecase = DeleteProductUseCase { store: state.store };
    usecase.execute(&product_id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
