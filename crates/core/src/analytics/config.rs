//! Tunables for the analytics pipeline.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FRONTIER_SAMPLES, DEFAULT_MAX_ITERATIONS, DEFAULT_RISK_FREE_RATE,
    DEFAULT_SOLVER_TOLERANCE, DEFAULT_WEIGHT_SUM_TOLERANCE, TRADING_DAYS_PER_YEAR,
};

/// Configuration for return/risk computation and optimization.
///
/// All values have working defaults; the server overrides them from
/// environment variables at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// Annual risk-free rate used in Sharpe ratios.
    pub risk_free_rate: f64,
    /// Periods per year implied by the data frequency (252 for daily).
    pub periods_per_year: f64,
    /// Number of efficient-frontier samples.
    pub frontier_samples: usize,
    /// Convergence tolerance for the numerical solver.
    pub solver_tolerance: f64,
    /// Allowed deviation of custom weights from summing to 1.
    pub weight_sum_tolerance: f64,
    /// Iteration cap for the numerical solver.
    pub max_iterations: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            frontier_samples: DEFAULT_FRONTIER_SAMPLES,
            solver_tolerance: DEFAULT_SOLVER_TOLERANCE,
            weight_sum_tolerance: DEFAULT_WEIGHT_SUM_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
