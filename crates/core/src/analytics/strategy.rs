//! Strategy resolver: from risk statistics to a weight vector.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::analytics::config::AnalyticsConfig;
use crate::analytics::models::{PortfolioPoint, RiskStats};
use crate::analytics::solver::{ProjectedGradientSolver, SimplexObjective, SimplexSolver};
use crate::constants::WEIGHT_NON_NEGATIVITY_TOLERANCE;
use crate::errors::{AnalyticsError, Result};

/// The closed set of portfolio-construction strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// 1/N in every asset.
    EqualWeight,
    /// Minimize `w' Sigma w` over the long-only simplex.
    MinRisk,
    /// Maximize `(w'mu - rf) / sqrt(w' Sigma w)` over the same set.
    MaxSharpe,
    /// Caller-supplied weights, validated and renormalized.
    Custom(Vec<f64>),
}

/// Resolve a strategy into weights and their derived metrics.
///
/// The reported Sharpe ratio accompanies every strategy, not only
/// `MaxSharpe`. Repeated calls with identical input return identical
/// output: the solver is deterministic and always starts from equal
/// weights.
pub fn resolve_strategy(
    stats: &RiskStats,
    strategy: &Strategy,
    config: &AnalyticsConfig,
) -> Result<PortfolioPoint> {
    let n = stats.asset_count();
    debug!("Resolving {:?} over {} assets", strategy, n);
    let weights = match strategy {
        Strategy::EqualWeight => equal_weights(n),
        Strategy::MinRisk => min_risk_weights(stats, config)?,
        Strategy::MaxSharpe => max_sharpe_weights(stats, config)?,
        Strategy::Custom(candidate) => validate_custom_weights(candidate, n, config)?,
    };
    Ok(stats.point(&weights, config.risk_free_rate))
}

pub(crate) fn equal_weights(n: usize) -> DVector<f64> {
    DVector::from_element(n, 1.0 / n as f64)
}

/// Minimum-variance weights on the long-only simplex.
pub(crate) fn min_risk_weights(stats: &RiskStats, config: &AnalyticsConfig) -> Result<DVector<f64>> {
    check_covariance(&stats.covariance, config.solver_tolerance)?;
    let solver = ProjectedGradientSolver::from_config(config);
    let objective = VarianceObjective {
        covariance: &stats.covariance,
    };
    solver.minimize(&objective, equal_weights(stats.asset_count()))
}

/// Maximum-Sharpe weights, solved as negative-Sharpe minimization from
/// the equal-weight starting point.
pub(crate) fn max_sharpe_weights(
    stats: &RiskStats,
    config: &AnalyticsConfig,
) -> Result<DVector<f64>> {
    check_covariance(&stats.covariance, config.solver_tolerance)?;
    if stats.covariance.amax() <= config.solver_tolerance {
        // Zero variance everywhere on the simplex.
        return Err(AnalyticsError::DegenerateSharpe);
    }
    let solver = ProjectedGradientSolver::from_config(config);
    let objective = NegativeSharpeObjective {
        mean_returns: &stats.mean_returns,
        covariance: &stats.covariance,
        risk_free_rate: config.risk_free_rate,
    };
    let weights = solver.minimize(&objective, equal_weights(stats.asset_count()))?;
    if stats.portfolio_variance(&weights) <= config.solver_tolerance {
        return Err(AnalyticsError::DegenerateSharpe);
    }
    Ok(weights)
}

/// Validate caller-supplied custom weights against the asset count.
///
/// A sum within the configured tolerance of 1 is renormalized to sum
/// exactly; anything further off is rejected.
fn validate_custom_weights(
    candidate: &[f64],
    n: usize,
    config: &AnalyticsConfig,
) -> Result<DVector<f64>> {
    if candidate.len() != n {
        return Err(AnalyticsError::InvalidWeights(format!(
            "expected {} weights, got {}",
            n,
            candidate.len()
        )));
    }
    if candidate.iter().any(|w| !w.is_finite()) {
        return Err(AnalyticsError::InvalidWeights(
            "weights must be finite numbers".to_string(),
        ));
    }
    if let Some(w) = candidate
        .iter()
        .find(|&&w| w < -WEIGHT_NON_NEGATIVITY_TOLERANCE)
    {
        return Err(AnalyticsError::InvalidWeights(format!(
            "negative weight {} is not allowed in a long-only portfolio",
            w
        )));
    }
    let sum: f64 = candidate.iter().sum();
    if (sum - 1.0).abs() > config.weight_sum_tolerance {
        return Err(AnalyticsError::InvalidWeights(format!(
            "weights sum to {}, expected 1.0",
            sum
        )));
    }
    Ok(DVector::from_iterator(
        n,
        candidate.iter().map(|&w| (w / sum).max(0.0)),
    ))
}

/// Reject covariance matrices that are not usable: non-finite entries
/// or an eigenvalue materially below zero (not positive semidefinite).
///
/// Rank-deficient but PSD matrices pass; the projection solver does
/// not invert anything, and a sample covariance is legitimately
/// singular whenever periods < assets.
fn check_covariance(covariance: &DMatrix<f64>, tolerance: f64) -> Result<()> {
    if covariance.iter().any(|v| !v.is_finite()) {
        return Err(AnalyticsError::OptimizationFailed(
            "covariance matrix contains non-finite entries".to_string(),
        ));
    }
    let eigenvalues = covariance.symmetric_eigenvalues();
    let scale = covariance.amax().max(1.0);
    if eigenvalues.min() < -tolerance.max(1e-12) * scale {
        return Err(AnalyticsError::OptimizationFailed(
            "covariance matrix is not positive semidefinite".to_string(),
        ));
    }
    Ok(())
}

struct VarianceObjective<'a> {
    covariance: &'a DMatrix<f64>,
}

impl SimplexObjective for VarianceObjective<'_> {
    fn value(&self, w: &DVector<f64>) -> f64 {
        (self.covariance * w).dot(w)
    }

    fn gradient(&self, w: &DVector<f64>) -> DVector<f64> {
        2.0 * (self.covariance * w)
    }
}

struct NegativeSharpeObjective<'a> {
    mean_returns: &'a DVector<f64>,
    covariance: &'a DMatrix<f64>,
    risk_free_rate: f64,
}

impl SimplexObjective for NegativeSharpeObjective<'_> {
    fn value(&self, w: &DVector<f64>) -> f64 {
        let variance = (self.covariance * w).dot(w);
        if variance <= 0.0 {
            return f64::INFINITY;
        }
        -(self.mean_returns.dot(w) - self.risk_free_rate) / variance.sqrt()
    }

    fn gradient(&self, w: &DVector<f64>) -> DVector<f64> {
        let sigma_w = self.covariance * w;
        let variance = sigma_w.dot(w);
        if variance <= 0.0 {
            return DVector::from_element(w.len(), f64::INFINITY);
        }
        let volatility = variance.sqrt();
        let excess = self.mean_returns.dot(w) - self.risk_free_rate;
        // d/dw [-(w'mu - rf) / sqrt(w'Sigma w)]
        -(self.mean_returns / volatility) + sigma_w * (excess / (variance * volatility))
    }
}
