use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Market service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketServiceError {
    #[error("missing required fields: {0}")]
    MissingFields(String),
    #[error("missing data")]
    MissingData,
    #[error("cart is empty")]
    CartEmpty,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("seller card not found")]
    SellerCardNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for MarketServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields(_) | Self::MissingData | Self::CartEmpty => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::SellerCardNotFound
            | Self::ProductNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are not logged here; TraceLayer already records them.
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format_args!("{e:#}"), "internal error");
            body["details"] = format!("{e:#}").into();
        }
        (status, axum::Json(body)).into_response()
    }
}
