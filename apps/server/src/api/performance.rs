use std::sync::Arc;

use axum::{extract::State, Json};
use optifolio_core::asset_performance;

use crate::{
    api::fetch_stats, error::ApiResult, main_lib::AppState, models::PerformanceResponse,
};

/// Annualized return, volatility and Sharpe per universe asset.
pub async fn universe_performance(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PerformanceResponse>> {
    let symbols: Vec<String> = state.universe.iter().map(|e| e.symbol.clone()).collect();
    let (stats, start_date, end_date) = fetch_stats(&state, &symbols).await?;
    let assets = asset_performance(&stats, state.analytics.risk_free_rate);
    Ok(Json(PerformanceResponse {
        start_date,
        end_date,
        assets,
    }))
}
