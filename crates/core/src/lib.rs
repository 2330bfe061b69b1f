//! Optifolio analytics core.
//!
//! Pure Modern Portfolio Theory computations over historical price
//! series: return/risk statistics, strategy resolution (equal-weight,
//! minimum-risk, maximum-Sharpe, custom weights) and efficient-frontier
//! sampling. Everything here is synchronous, deterministic and free of
//! shared state; each request derives its statistics fresh from the
//! input series.

pub mod analytics;
pub mod constants;
pub mod errors;

pub use analytics::config::AnalyticsConfig;
pub use analytics::frontier::{random_portfolios, sample_frontier};
pub use analytics::models::{AssetPerformance, PortfolioPoint, ReturnMatrix, RiskStats};
pub use analytics::returns::asset_performance;
pub use analytics::solver::{ProjectedGradientSolver, SimplexObjective, SimplexSolver};
pub use analytics::strategy::{resolve_strategy, Strategy};
pub use errors::{AnalyticsError, Result};
