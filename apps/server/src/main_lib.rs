use std::sync::Arc;

use optifolio_core::AnalyticsConfig;
use optifolio_market_data::{HistoryService, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::models::UniverseEntry;

pub struct AppState {
    pub history: HistoryService,
    pub analytics: AnalyticsConfig,
    pub universe: Vec<UniverseEntry>,
    pub lookback_days: i64,
}

/// Env-filtered subscriber; `OPTIFOLIO_LOG_JSON=1` switches the fmt
/// layer to JSON lines for log shippers.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("OPTIFOLIO_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if json {
        let fmt_layer = fmt::layer().json().with_current_span(false);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::new()?;
    let history = HistoryService::new(Arc::new(provider), config.fetch_timeout);
    let analytics = AnalyticsConfig {
        risk_free_rate: config.risk_free_rate,
        periods_per_year: config.periods_per_year,
        frontier_samples: config.frontier_samples,
        ..AnalyticsConfig::default()
    };
    Ok(Arc::new(AppState {
        history,
        analytics,
        universe: config.universe.clone(),
        lookback_days: config.lookback_days,
    }))
}
