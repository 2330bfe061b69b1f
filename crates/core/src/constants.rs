//! Analytics defaults and numeric limits.

/// Trading periods per year for daily data.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default annual risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0;

/// Default number of efficient-frontier samples.
pub const DEFAULT_FRONTIER_SAMPLES: usize = 50;

/// Default solver convergence tolerance.
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1e-8;

/// Default tolerance on the sum of caller-supplied weights.
pub const DEFAULT_WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default iteration cap for the projected-gradient solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Slack allowed on individual weight non-negativity.
pub const WEIGHT_NON_NEGATIVITY_TOLERANCE: f64 = 1e-9;

/// Minimum number of assets in a portfolio.
pub const MIN_ASSETS: usize = 2;

/// Minimum aligned price dates (two return periods) for a
/// non-degenerate sample covariance.
pub const MIN_ALIGNED_DATES: usize = 3;

/// Size of the random portfolio cloud rendered behind the frontier.
pub const RANDOM_PORTFOLIO_COUNT: usize = 1_000;

/// Seed for the random portfolio cloud, fixed for reproducible charts.
pub const RANDOM_PORTFOLIO_SEED: u64 = 42;
