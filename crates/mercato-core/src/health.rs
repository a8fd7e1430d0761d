use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. The embedded document store
/// is always ready; services with remote backends override this per service.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
