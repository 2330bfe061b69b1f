use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use optifolio_core::{ReturnMatrix, RiskStats};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, error::ApiResult, main_lib::AppState};

pub mod analyze;
pub mod health;
pub mod performance;
pub mod tickers;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().expect("Invalid CORS origin"))
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/health", get(health::healthz))
        .route("/tickers", get(tickers::list_tickers))
        .route("/analyze", post(analyze::analyze_portfolio))
        .route("/performance", get(performance::universe_performance));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Fetch the lookback window for `symbols` and derive annualized risk
/// statistics, preserving the caller's symbol order.
pub(crate) async fn fetch_stats(
    state: &AppState,
    symbols: &[String],
) -> ApiResult<(RiskStats, NaiveDate, NaiveDate)> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(state.lookback_days);
    let mut by_symbol = state.history.fetch(symbols, start, end).await?;
    let mut series = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let fetched = by_symbol
            .remove(symbol)
            .ok_or_else(|| anyhow::anyhow!("No series fetched for {}", symbol))?;
        series.push(fetched);
    }
    let matrix = ReturnMatrix::from_series(&series)?;
    let stats = RiskStats::from_returns(&matrix, state.analytics.periods_per_year);
    Ok((stats, start, end))
}
