//! Market data provider implementations.

pub mod traits;
pub mod yahoo;

pub use traits::MarketDataProvider;
