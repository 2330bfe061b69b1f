//! Market data provider trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::AssetSeries;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// The analytics pipeline only consumes daily closing prices, so this
/// is deliberately the narrowest possible seam.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// for naming the provider in errors.
    fn id(&self) -> &'static str;

    /// Fetch historical daily closes for a symbol.
    ///
    /// Both ends of the date range are inclusive. The returned series
    /// is ordered by date ascending with no duplicate dates.
    ///
    /// Fails with [`MarketDataError::SymbolNotFound`] for unknown
    /// symbols and [`MarketDataError::NoDataForRange`] when the symbol
    /// exists but has no quotes in the range.
    async fn historical_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AssetSeries, MarketDataError>;
}
