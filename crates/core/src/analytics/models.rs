//! Derived analytics types: return matrices, risk statistics and
//! resolved portfolio points.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Periodic returns for a fixed ordered set of assets.
///
/// Rows are periods, columns are assets, built from strictly
/// date-aligned price series. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnMatrix {
    symbols: Vec<String>,
    returns: DMatrix<f64>,
}

impl ReturnMatrix {
    pub(crate) fn new(symbols: Vec<String>, returns: DMatrix<f64>) -> Self {
        debug_assert_eq!(symbols.len(), returns.ncols());
        Self { symbols, returns }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn returns(&self) -> &DMatrix<f64> {
        &self.returns
    }

    /// Number of return periods (one fewer than aligned dates).
    pub fn period_count(&self) -> usize {
        self.returns.nrows()
    }

    pub fn asset_count(&self) -> usize {
        self.returns.ncols()
    }
}

/// Annualized mean-return vector and covariance matrix for a fixed
/// ordered set of assets. Derived fresh per request; immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskStats {
    pub symbols: Vec<String>,
    /// Annualized arithmetic mean return per asset.
    pub mean_returns: DVector<f64>,
    /// Annualized sample covariance, symmetric PSD by construction.
    pub covariance: DMatrix<f64>,
}

impl RiskStats {
    pub fn asset_count(&self) -> usize {
        self.mean_returns.len()
    }

    /// Expected annual portfolio return for a weight vector.
    pub fn portfolio_return(&self, weights: &DVector<f64>) -> f64 {
        self.mean_returns.dot(weights)
    }

    /// Annual portfolio variance `w' Sigma w`.
    pub fn portfolio_variance(&self, weights: &DVector<f64>) -> f64 {
        (&self.covariance * weights).dot(weights)
    }

    /// Annual portfolio volatility.
    pub fn portfolio_volatility(&self, weights: &DVector<f64>) -> f64 {
        self.portfolio_variance(weights).max(0.0).sqrt()
    }

    /// Sharpe ratio `(w'mu - rf) / sqrt(w' Sigma w)`.
    ///
    /// Returns 0 for a zero-volatility portfolio; the strategy layer
    /// raises `DegenerateSharpe` where that matters.
    pub fn sharpe(&self, weights: &DVector<f64>, risk_free_rate: f64) -> f64 {
        let volatility = self.portfolio_volatility(weights);
        if volatility <= f64::EPSILON {
            return 0.0;
        }
        (self.portfolio_return(weights) - risk_free_rate) / volatility
    }

    /// Bundle the full set of reported metrics for a weight vector.
    pub fn point(&self, weights: &DVector<f64>, risk_free_rate: f64) -> PortfolioPoint {
        PortfolioPoint {
            expected_return: self.portfolio_return(weights),
            volatility: self.portfolio_volatility(weights),
            sharpe: self.sharpe(weights, risk_free_rate),
            weights: weights.iter().copied().collect(),
        }
    }
}

/// One resolved portfolio: annualized metrics plus the weight vector
/// that produced them, ordered like the request's symbols.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPoint {
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub weights: Vec<f64>,
}

/// Annualized stand-alone statistics for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub symbol: String,
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
}
