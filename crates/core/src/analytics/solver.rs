//! Constrained minimization over the long-only simplex.
//!
//! The strategy resolver and frontier sampler only ever need one
//! capability: minimize a smooth objective subject to `sum(w) = 1`,
//! `w >= 0`. That capability sits behind [`SimplexSolver`] so the
//! callers stay solver-agnostic.

use nalgebra::DVector;

use crate::analytics::config::AnalyticsConfig;
use crate::errors::{AnalyticsError, Result};

/// A smooth objective with an analytic gradient.
pub trait SimplexObjective {
    fn value(&self, weights: &DVector<f64>) -> f64;
    fn gradient(&self, weights: &DVector<f64>) -> DVector<f64>;
}

/// Minimizes a [`SimplexObjective`] over the long-only simplex.
pub trait SimplexSolver {
    /// Minimize from a feasible starting point.
    ///
    /// The result is deterministic for identical input: same start,
    /// same tolerance, same iteration sequence.
    fn minimize(
        &self,
        objective: &dyn SimplexObjective,
        start: DVector<f64>,
    ) -> Result<DVector<f64>>;
}

/// Projected gradient descent with backtracking line search.
///
/// Each step moves against the gradient, projects back onto the
/// simplex (exact Euclidean projection, found by bisection on the
/// shift tau) and halves the step until the objective stops
/// increasing. Convergence is declared when the iterate or the
/// objective stops moving by more than the tolerance; a point where
/// no projected step can decrease the objective is a constrained
/// stationary point and is returned as the solution.
#[derive(Debug, Clone)]
pub struct ProjectedGradientSolver {
    tolerance: f64,
    max_iterations: usize,
}

impl ProjectedGradientSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.solver_tolerance, config.max_iterations)
    }
}

impl SimplexSolver for ProjectedGradientSolver {
    fn minimize(
        &self,
        objective: &dyn SimplexObjective,
        start: DVector<f64>,
    ) -> Result<DVector<f64>> {
        let mut weights = start;
        project_onto_simplex(&mut weights);

        let mut value = objective.value(&weights);
        if !value.is_finite() {
            return Err(AnalyticsError::OptimizationFailed(
                "objective is not finite at the starting point".to_string(),
            ));
        }

        let mut step = 1.0_f64;
        for _ in 0..self.max_iterations {
            let gradient = objective.gradient(&weights);
            if gradient.iter().any(|g| !g.is_finite()) {
                return Err(AnalyticsError::OptimizationFailed(
                    "gradient is not finite".to_string(),
                ));
            }

            // Backtrack from the last accepted step size.
            let mut trial = step;
            let (candidate, candidate_value) = loop {
                let mut candidate = &weights - trial * &gradient;
                project_onto_simplex(&mut candidate);
                let candidate_value = objective.value(&candidate);
                if candidate_value.is_finite() && candidate_value <= value {
                    break (candidate, candidate_value);
                }
                trial *= 0.5;
                if trial < 1e-16 {
                    // No descent direction left within float precision.
                    return Ok(weights);
                }
            };

            let moved = (&candidate - &weights).amax();
            let improved = value - candidate_value;
            weights = candidate;
            value = candidate_value;
            step = (trial * 2.0).min(1.0);

            if moved < self.tolerance && improved < self.tolerance * value.abs().max(1.0) {
                return Ok(weights);
            }
        }

        Err(AnalyticsError::OptimizationFailed(format!(
            "no convergence after {} iterations",
            self.max_iterations
        )))
    }
}

/// Euclidean projection onto the simplex `{ w >= 0, sum(w) = 1 }`.
///
/// Finds the shift `tau` with `sum(max(w_i - tau, 0)) = 1` by
/// bisection, then applies it. The residual renormalization only
/// cleans up the last bits of bisection error.
pub fn project_onto_simplex(weights: &mut DVector<f64>) {
    if weights.is_empty() {
        return;
    }
    let mut lo = weights.min() - 1.0;
    let mut hi = weights.max();
    for _ in 0..100 {
        let mid = 0.5 * (lo + hi);
        let sum: f64 = weights.iter().map(|&w| (w - mid).max(0.0)).sum();
        if sum > 1.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let tau = 0.5 * (lo + hi);
    for w in weights.iter_mut() {
        *w = (*w - tau).max(0.0);
    }
    let total = weights.sum();
    if total > f64::EPSILON {
        *weights /= total;
    } else {
        let n = weights.len();
        weights.fill(1.0 / n as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    struct Quadratic {
        covariance: DMatrix<f64>,
    }

    impl SimplexObjective for Quadratic {
        fn value(&self, w: &DVector<f64>) -> f64 {
            (&self.covariance * w).dot(w)
        }

        fn gradient(&self, w: &DVector<f64>) -> DVector<f64> {
            2.0 * (&self.covariance * w)
        }
    }

    #[test]
    fn test_projection_yields_valid_weights() {
        let mut w = DVector::from_vec(vec![1.5, -0.3, 0.4]);
        project_onto_simplex(&mut w);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
        assert!(w.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_projection_recovers_from_all_negative() {
        let mut w = DVector::from_vec(vec![-0.5, -0.5]);
        project_onto_simplex(&mut w);
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_minimize_finds_low_variance_corner() {
        // Asset 1 is far less volatile and uncorrelated; the minimum
        // variance portfolio leans heavily toward it.
        let solver = ProjectedGradientSolver::new(1e-10, 20_000);
        let objective = Quadratic {
            covariance: DMatrix::from_row_slice(2, 2, &[0.09, 0.0, 0.0, 0.01]),
        };
        let start = DVector::from_element(2, 0.5);
        let weights = solver.minimize(&objective, start).unwrap();
        // Analytic optimum: w = (0.1, 0.9).
        assert_relative_eq!(weights[0], 0.1, epsilon = 1e-4);
        assert_relative_eq!(weights[1], 0.9, epsilon = 1e-4);
    }

    #[test]
    fn test_minimize_is_deterministic() {
        let solver = ProjectedGradientSolver::new(1e-10, 20_000);
        let objective = Quadratic {
            covariance: DMatrix::from_row_slice(2, 2, &[0.04, 0.01, 0.01, 0.02]),
        };
        let a = solver
            .minimize(&objective, DVector::from_element(2, 0.5))
            .unwrap();
        let b = solver
            .minimize(&objective, DVector::from_element(2, 0.5))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_finite_start_fails() {
        struct Nan;
        impl SimplexObjective for Nan {
            fn value(&self, _w: &DVector<f64>) -> f64 {
                f64::NAN
            }
            fn gradient(&self, w: &DVector<f64>) -> DVector<f64> {
                DVector::zeros(w.len())
            }
        }
        let solver = ProjectedGradientSolver::new(1e-8, 100);
        let result = solver.minimize(&Nan, DVector::from_element(2, 0.5));
        assert!(matches!(result, Err(AnalyticsError::OptimizationFailed(_))));
    }
}
