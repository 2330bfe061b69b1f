use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use optifolio_core::constants::{MIN_ASSETS, RANDOM_PORTFOLIO_COUNT, RANDOM_PORTFOLIO_SEED};
use optifolio_core::{
    random_portfolios, resolve_strategy, sample_frontier, AnalyticsConfig, AnalyticsError,
    PortfolioPoint, RiskStats, Strategy,
};
use tracing::warn;

use crate::{
    api::fetch_stats,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{AnalyzeRequest, AnalyzeResponse, OptimalPortfolios, StrategyKind},
};

pub async fn analyze_portfolio(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    if body.tickers.len() < MIN_ASSETS {
        return Err(AnalyticsError::InsufficientAssets {
            count: body.tickers.len(),
        }
        .into());
    }
    let distinct: HashSet<&String> = body.tickers.iter().collect();
    if distinct.len() != body.tickers.len() {
        return Err(ApiError::BadRequest(
            "tickers must not contain duplicates".to_string(),
        ));
    }

    let strategy = match body.strategy {
        StrategyKind::EqualWeight => Strategy::EqualWeight,
        StrategyKind::MinRisk => Strategy::MinRisk,
        StrategyKind::MaxSharpe => Strategy::MaxSharpe,
        StrategyKind::Custom => {
            let weights = body.custom_weights.ok_or_else(|| {
                ApiError::BadRequest(
                    "customWeights is required for the custom strategy".to_string(),
                )
            })?;
            Strategy::Custom(weights)
        }
    };

    let (stats, _, _) = fetch_stats(&state, &body.tickers).await?;
    let config = &state.analytics;

    // The requested strategy's failure is the request's failure; the
    // extras below degrade gracefully instead.
    let portfolio = resolve_strategy(&stats, &strategy, config)?;
    let max_sharpe = reference_portfolio(&stats, Strategy::MaxSharpe, config);
    let min_risk = reference_portfolio(&stats, Strategy::MinRisk, config);
    let frontier_points = match sample_frontier(&stats, config) {
        Ok(points) => points,
        Err(err) => {
            warn!("Frontier sampling unavailable: {}", err);
            Vec::new()
        }
    };
    let random_points =
        random_portfolios(&stats, config, RANDOM_PORTFOLIO_COUNT, RANDOM_PORTFOLIO_SEED);

    Ok(Json(AnalyzeResponse {
        symbols: body.tickers,
        portfolio,
        optimal: OptimalPortfolios {
            max_sharpe,
            min_risk,
        },
        frontier_points,
        random_points,
    }))
}

fn reference_portfolio(
    stats: &RiskStats,
    strategy: Strategy,
    config: &AnalyticsConfig,
) -> Option<PortfolioPoint> {
    match resolve_strategy(stats, &strategy, config) {
        Ok(point) => Some(point),
        Err(err) => {
            warn!("Reference {:?} portfolio unavailable: {}", strategy, err);
            None
        }
    }
}
