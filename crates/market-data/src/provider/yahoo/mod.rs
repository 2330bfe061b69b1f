//! Yahoo Finance market data provider.
//!
//! Fetches historical daily closes through the Yahoo Finance chart API.
//! Works for equities and ETFs worldwide, including exchange-suffixed
//! symbols such as `RELIANCE.NS`.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{AssetSeries, PricePoint};
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| MarketDataError::Unavailable {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to initialize Yahoo connector: {}", e),
        })?;
        Ok(Self { connector })
    }

    /// Convert a date to the start-of-day timestamp the Yahoo API expects.
    fn to_offset_datetime(date: NaiveDate, end_of_day: bool) -> OffsetDateTime {
        let (h, m, s) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
        let ts = date
            .and_hms_opt(h, m, s)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        OffsetDateTime::from_unix_timestamp(ts).unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert one Yahoo quote to a price point, rejecting unusable rows.
    fn quote_to_point(quote: &yahoo::Quote) -> Result<PricePoint, MarketDataError> {
        let date = Utc
            .timestamp_opt(quote.timestamp as i64, 0)
            .single()
            .map(|dt| dt.date_naive())
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", quote.timestamp),
            })?;
        if !quote.close.is_finite() || quote.close <= 0.0 {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Invalid close price {} on {}", quote.close, date),
            });
        }
        Ok(PricePoint {
            date,
            close: quote.close,
        })
    }

    fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
        match error {
            yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                MarketDataError::SymbolNotFound(symbol.to_string())
            }
            other => MarketDataError::Unavailable {
                provider: PROVIDER_ID.to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn historical_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AssetSeries, MarketDataError> {
        debug!("Fetching daily closes for {} from {} to {}", symbol, start, end);

        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::to_offset_datetime(start, false),
                Self::to_offset_datetime(end, true),
            )
            .await
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| match Self::quote_to_point(q) {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!("Skipping quote for {}: {}", symbol, e);
                    None
                }
            })
            .collect();

        if points.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        Ok(AssetSeries::new(symbol, points))
    }
}
