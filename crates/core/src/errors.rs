//! Core error types for the analytics crate.

use thiserror::Error;

/// Type alias for Result using our error type.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors produced by the analytics pipeline.
///
/// Every failure names the offending condition; nothing is silently
/// swallowed except per-point infeasibility inside the frontier
/// sampler, which is a documented omission rather than an error.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Fewer than two assets were selected.
    #[error("At least 2 assets are required, got {count}")]
    InsufficientAssets { count: usize },

    /// Too few overlapping price dates across the selected assets.
    #[error("Insufficient overlapping history: {aligned} aligned dates, need at least 3")]
    InsufficientHistory { aligned: usize },

    /// Caller-supplied custom weights are malformed.
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// The numerical solver failed to converge, or the covariance
    /// matrix is unusable.
    #[error("Optimization failed: {0}")]
    OptimizationFailed(String),

    /// Portfolio variance is zero for every feasible weight vector, so
    /// the Sharpe ratio is undefined.
    #[error("Degenerate Sharpe ratio: portfolio variance is zero for all feasible weights")]
    DegenerateSharpe,
}
