//! Optifolio market data crate.
//!
//! Fetches historical daily closing prices for the portfolio analytics
//! core. Providers implement the [`MarketDataProvider`] trait; the
//! [`HistoryService`] wraps a provider with a per-request time bound
//! and fans a multi-symbol request out into one series per symbol.

pub mod errors;
pub mod history;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use history::HistoryService;
pub use models::{AssetSeries, PricePoint};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
