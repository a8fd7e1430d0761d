use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use mercato_auth::Role;

use crate::auth::Caller;
use crate::domain::types::User;
use crate::error::MarketServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase,
};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub provider: Option<String>,
}

/// The document id is always the caller's subject; the body cannot
/// register anyone else.
pub async fn create_user(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), MarketServiceError> {
    let mut missing = Vec::new();
    if body.email.is_none() {
        missing.push("email");
    }
    if body.name.is_none() {
        missing.push("name");
    }
    let (Some(email), Some(name)) = (body.email, body.name) else {
        return Err(MarketServiceError::MissingFields(missing.join(", ")));
    };

    let usecase = CreateUserUseCase { store: state.store };
    usecase
        .execute(
            caller.user_id(),
            CreateUserInput {
                email,
                name,
                role: body.role,
                provider: body.provider,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered")),
    ))
}

// ── GET /api/users/{user_id} ─────────────────────────────────────────────────

pub async fn get_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, MarketServiceError> {
    if user_id != caller.user_id() && !caller.is_admin() {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = GetUserUseCase { store: state.store };
    Ok(Json(usecase.execute(&user_id).await?))
}

// ── DELETE /api/users/{user_id} ──────────────────────────────────────────────

pub async fn delete_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, MarketServiceError> {
    if user_id != caller.user_id() && !caller.is_admin() {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = DeleteUserUseCase {
        store: state.store,
        verifier: state.verifier,
    };
    usecase.execute(&user_id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
