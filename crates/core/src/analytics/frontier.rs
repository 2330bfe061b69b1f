//! Efficient-frontier sampling and the random portfolio cloud.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::analytics::config::AnalyticsConfig;
use crate::analytics::models::{PortfolioPoint, RiskStats};
use crate::analytics::solver::{ProjectedGradientSolver, SimplexObjective, SimplexSolver};
use crate::analytics::strategy::min_risk_weights;
use crate::errors::Result;

/// Weight on the return-target penalty term. Large enough that the
/// achieved return tracks the target closely relative to typical
/// annualized variances, small enough to keep the problem well
/// conditioned.
const TARGET_PENALTY: f64 = 1_000.0;

/// How far the achieved return may sit from its target before the
/// sample is discarded as infeasible.
const TARGET_SLACK: f64 = 1e-3;

/// Sample the efficient frontier between the minimum-variance return
/// and the highest single-asset mean return.
///
/// Each sample minimizes variance with a quadratic penalty pulling the
/// portfolio return toward its target, warm-started from the previous
/// sample. Targets that no long-only portfolio can reach are skipped,
/// so the result may hold fewer than `frontier_samples` points; a
/// short frontier is still a valid frontier.
pub fn sample_frontier(stats: &RiskStats, config: &AnalyticsConfig) -> Result<Vec<PortfolioPoint>> {
    let min_risk = min_risk_weights(stats, config)?;
    let low = stats.portfolio_return(&min_risk);
    let high = stats.mean_returns.max();

    let samples = config.frontier_samples.max(2);
    if high - low <= 1e-12 * high.abs().max(1.0) {
        // Minimum variance already earns the best available return.
        return Ok(vec![stats.point(&min_risk, config.risk_free_rate)]);
    }

    let solver = ProjectedGradientSolver::from_config(config);
    let mut points = Vec::with_capacity(samples);
    let mut warm_start = min_risk;
    for k in 0..samples {
        let target = low + (high - low) * k as f64 / (samples - 1) as f64;
        let objective = TargetReturnObjective {
            mean_returns: &stats.mean_returns,
            covariance: &stats.covariance,
            target,
        };
        let weights = solver.minimize(&objective, warm_start.clone())?;
        if (stats.portfolio_return(&weights) - target).abs() > TARGET_SLACK {
            debug!("Skipping unreachable frontier target {:.6}", target);
            continue;
        }
        warm_start = weights.clone();
        points.push(stats.point(&weights, config.risk_free_rate));
    }
    Ok(points)
}

/// The scatter of feasible portfolios plotted behind the frontier.
///
/// Weights are drawn uniformly and normalized; the generator is seeded
/// so the cloud is identical across runs for the same asset set.
pub fn random_portfolios(
    stats: &RiskStats,
    config: &AnalyticsConfig,
    count: usize,
    seed: u64,
) -> Vec<PortfolioPoint> {
    let n = stats.asset_count();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut weights = DVector::from_fn(n, |_, _| rng.gen::<f64>());
            let total = weights.sum();
            if total > f64::EPSILON {
                weights /= total;
            } else {
                weights.fill(1.0 / n as f64);
            }
            stats.point(&weights, config.risk_free_rate)
        })
        .collect()
}

/// Variance plus a quadratic penalty on missing the return target.
struct TargetReturnObjective<'a> {
    mean_returns: &'a DVector<f64>,
    covariance: &'a DMatrix<f64>,
    target: f64,
}

impl SimplexObjective for TargetReturnObjective<'_> {
    fn value(&self, w: &DVector<f64>) -> f64 {
        let gap = self.mean_returns.dot(w) - self.target;
        (self.covariance * w).dot(w) + TARGET_PENALTY * gap * gap
    }

    fn gradient(&self, w: &DVector<f64>) -> DVector<f64> {
        let gap = self.mean_returns.dot(w) - self.target;
        2.0 * (self.covariance * w) + self.mean_returns * (2.0 * TARGET_PENALTY * gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_asset_stats() -> RiskStats {
        RiskStats {
            symbols: vec!["AAA".to_string(), "BBB".to_string()],
            mean_returns: DVector::from_row_slice(&[0.10, 0.20]),
            covariance: DMatrix::from_row_slice(2, 2, &[0.04, 0.01, 0.01, 0.09]),
        }
    }

    fn config() -> AnalyticsConfig {
        AnalyticsConfig {
            solver_tolerance: 1e-10,
            max_iterations: 50_000,
            frontier_samples: 50,
            ..AnalyticsConfig::default()
        }
    }

    #[test]
    fn test_frontier_spans_min_variance_to_best_asset() {
        let stats = two_asset_stats();
        let points = sample_frontier(&stats, &config()).unwrap();
        assert!(points.len() >= 2);
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        // Lowest target is the minimum-variance return, highest is the
        // best single asset mean.
        assert!(first.expected_return < last.expected_return);
        assert!(last.expected_return > 0.195);
    }

    #[test]
    fn test_frontier_returns_increase_monotonically() {
        let stats = two_asset_stats();
        let points = sample_frontier(&stats, &config()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].expected_return >= pair[0].expected_return - 1e-9);
        }
    }

    #[test]
    fn test_frontier_volatility_rises_beyond_min_variance() {
        // With two assets, every return above the minimum-variance
        // return pins the weights; volatility must be non-decreasing
        // along that stretch.
        let stats = two_asset_stats();
        let points = sample_frontier(&stats, &config()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].volatility >= pair[0].volatility - 1e-6);
        }
    }

    #[test]
    fn test_frontier_weights_stay_feasible() {
        let stats = two_asset_stats();
        let points = sample_frontier(&stats, &config()).unwrap();
        for point in &points {
            let sum: f64 = point.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(point.weights.iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn test_equal_means_collapse_to_single_point() {
        let stats = RiskStats {
            symbols: vec!["AAA".to_string(), "BBB".to_string()],
            mean_returns: DVector::from_row_slice(&[0.10, 0.10]),
            covariance: DMatrix::from_row_slice(2, 2, &[0.04, 0.0, 0.0, 0.09]),
        };
        let points = sample_frontier(&stats, &config()).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_random_portfolios_are_seeded_and_feasible() {
        let stats = two_asset_stats();
        let cfg = config();
        let a = random_portfolios(&stats, &cfg, 200, 42);
        let b = random_portfolios(&stats, &cfg, 200, 42);
        assert_eq!(a, b);
        for point in &a {
            let sum: f64 = point.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(point.weights.iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn test_random_portfolios_differ_across_seeds() {
        let stats = two_asset_stats();
        let cfg = config();
        let a = random_portfolios(&stats, &cfg, 10, 1);
        let b = random_portfolios(&stats, &cfg, 10, 2);
        assert_ne!(a, b);
    }
}
