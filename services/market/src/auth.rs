//! Bearer-token caller extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use mercato_auth::{Identity, IdentityError, IdentityVerifier as _};

use crate::error::MarketServiceError;
use crate::state::AppState;

/// Caller identity verified from the `Authorization: Bearer` header.
///
/// Rejects with 401 when the header is absent, malformed, or the token
/// fails verification. Role and ownership enforcement (403) is done by
/// handlers after extraction.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl Caller {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = MarketServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_owned);
        let verifier = state.verifier.clone();

        async move {
            let bearer = bearer.ok_or(MarketServiceError::Unauthorized)?;
            let identity = verifier.verify(&bearer).await.map_err(|e| match e {
                IdentityError::Provider(e) => {
                    MarketServiceError::Internal(e.context("verify identity"))
                }
                _ => MarketServiceError::Unauthorized,
            })?;
            Ok(Self(identity))
        }
    }
}
