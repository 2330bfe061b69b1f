//! Multi-symbol history fetching with a per-request time bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::AssetSeries;
use crate::provider::MarketDataProvider;

/// Fetches one [`AssetSeries`] per requested symbol from a provider.
///
/// Each symbol fetch is bounded by `fetch_timeout`; exceeding it
/// surfaces [`MarketDataError::Timeout`] instead of hanging the
/// request. Failures are not retried here - the caller decides whether
/// to retry the whole request.
#[derive(Clone)]
pub struct HistoryService {
    provider: Arc<dyn MarketDataProvider>,
    fetch_timeout: Duration,
}

impl HistoryService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, fetch_timeout: Duration) -> Self {
        Self {
            provider,
            fetch_timeout,
        }
    }

    /// Fetch historical closes for every symbol over the same range.
    ///
    /// Fails fast on the first symbol that errors; a partial result is
    /// useless to the analytics core, which needs every series.
    pub async fn fetch(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, AssetSeries>, MarketDataError> {
        let mut series = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            debug!("Fetching history for {}", symbol);
            let fetched = tokio::time::timeout(
                self.fetch_timeout,
                self.provider.historical_closes(symbol, start, end),
            )
            .await
            .map_err(|_| MarketDataError::Timeout {
                provider: self.provider.id().to_string(),
            })??;
            series.insert(symbol.clone(), fetched);
        }
        Ok(series)
    }
}
