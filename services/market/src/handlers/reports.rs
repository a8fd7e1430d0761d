use axum::{
    Json,
    extract::{Query, State},
};

use crate::auth::Caller;
use crate::domain::types::Order;
use crate::error::MarketServiceError;
use crate::handlers::LimitQuery;
use crate::state::AppState;
use crate::usecase::reports::{
    LatestOrdersUseCase, MonthlyBucket, MonthlyPerformanceUseCase, SalesSummary,
    SalesSummaryUseCase, SellerRank, TopSellersUseCase,
};

fn require_admin(caller: &Caller) -> Result<(), MarketServiceError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(MarketServiceError::Forbidden)
    }
}

// ── GET /api/reports/summary ─────────────────────────────────────────────────

pub async fn sales_summary(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<SalesSummary>, MarketServiceError> {
    require_admin(&caller)?;
    let usecase = SalesSummaryUseCase { store: state.store };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/reports/monthly ─────────────────────────────────────────────────

pub async fn monthly_performance(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyBucket>>, MarketServiceError> {
    require_admin(&caller)?;
    let usecase = MonthlyPerformanceUseCase { store: state.store };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/reports/top-sellers ─────────────────────────────────────────────

pub async fn top_sellers(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<SellerRank>>, MarketServiceError> {
    require_admin(&caller)?;
    let usecase = TopSellersUseCase { store: state.store };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/reports/latest-orders ───────────────────────────────────────────

pub async fn latest_orders(
    caller: Caller,
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Order>>, MarketServiceError> {
    require_admin(&caller)?;
    let usecase = LatestOrdersUseCase { store: state.store };
    Ok(Json(usecase.execute(query.or_default()).await?))
}
