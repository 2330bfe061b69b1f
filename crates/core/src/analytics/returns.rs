//! Returns & risk engine: price series to annualized statistics.
//!
//! Series are aligned by strict date intersection - any date missing
//! from one series is dropped from all of them. Forward-filling would
//! keep more periods but makes the result depend on fetch order, so
//! the deterministic policy wins here.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use optifolio_market_data::AssetSeries;

use crate::analytics::models::{AssetPerformance, ReturnMatrix, RiskStats};
use crate::constants::{MIN_ALIGNED_DATES, MIN_ASSETS};
use crate::errors::{AnalyticsError, Result};

impl ReturnMatrix {
    /// Build the aligned periodic-return matrix for a set of series.
    ///
    /// Fails with `InsufficientAssets` for fewer than two series and
    /// with `InsufficientHistory` when fewer than three aligned dates
    /// remain (two return periods are the minimum for a non-degenerate
    /// sample covariance).
    pub fn from_series(series: &[AssetSeries]) -> Result<ReturnMatrix> {
        if series.len() < MIN_ASSETS {
            return Err(AnalyticsError::InsufficientAssets {
                count: series.len(),
            });
        }

        let aligned_dates = intersect_dates(series);
        if aligned_dates.len() < MIN_ALIGNED_DATES {
            return Err(AnalyticsError::InsufficientHistory {
                aligned: aligned_dates.len(),
            });
        }

        let by_date: Vec<HashMap<NaiveDate, f64>> = series
            .iter()
            .map(|s| s.points().iter().map(|p| (p.date, p.close)).collect())
            .collect();

        let dates: Vec<NaiveDate> = aligned_dates.into_iter().collect();
        let periods = dates.len() - 1;
        let assets = series.len();

        let mut returns = DMatrix::zeros(periods, assets);
        for (i, closes) in by_date.iter().enumerate() {
            for t in 1..dates.len() {
                let previous = closes[&dates[t - 1]];
                let current = closes[&dates[t]];
                returns[(t - 1, i)] = current / previous - 1.0;
            }
        }

        let symbols = series.iter().map(|s| s.symbol().to_string()).collect();
        Ok(ReturnMatrix::new(symbols, returns))
    }
}

/// Dates present in every series, in chronological order.
fn intersect_dates(series: &[AssetSeries]) -> BTreeSet<NaiveDate> {
    let mut iter = series.iter();
    let mut aligned: BTreeSet<NaiveDate> = match iter.next() {
        Some(first) => first.points().iter().map(|p| p.date).collect(),
        None => return BTreeSet::new(),
    };
    for s in iter {
        let dates: BTreeSet<NaiveDate> = s.points().iter().map(|p| p.date).collect();
        aligned = aligned.intersection(&dates).copied().collect();
    }
    aligned
}

impl RiskStats {
    /// Annualized mean-return vector and sample covariance matrix.
    ///
    /// Both are scaled by `periods_per_year`; the covariance uses the
    /// unbiased `periods - 1` denominator. Pure function of its input.
    pub fn from_returns(matrix: &ReturnMatrix, periods_per_year: f64) -> RiskStats {
        let returns = matrix.returns();
        let periods = matrix.period_count();
        let assets = matrix.asset_count();

        let mean_periodic: DVector<f64> =
            DVector::from_iterator(assets, returns.column_iter().map(|c| c.mean()));

        let mut covariance = DMatrix::zeros(assets, assets);
        let denominator = (periods - 1) as f64;
        for i in 0..assets {
            for j in i..assets {
                let mut sum = 0.0;
                for t in 0..periods {
                    sum += (returns[(t, i)] - mean_periodic[i])
                        * (returns[(t, j)] - mean_periodic[j]);
                }
                let value = sum / denominator * periods_per_year;
                covariance[(i, j)] = value;
                covariance[(j, i)] = value;
            }
        }

        RiskStats {
            symbols: matrix.symbols().to_vec(),
            mean_returns: mean_periodic * periods_per_year,
            covariance,
        }
    }
}

/// Stand-alone annualized return, volatility and Sharpe per asset.
pub fn asset_performance(stats: &RiskStats, risk_free_rate: f64) -> Vec<AssetPerformance> {
    stats
        .symbols
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let expected_return = stats.mean_returns[i];
            let volatility = stats.covariance[(i, i)].max(0.0).sqrt();
            let sharpe = if volatility <= f64::EPSILON {
                0.0
            } else {
                (expected_return - risk_free_rate) / volatility
            };
            AssetPerformance {
                symbol: symbol.clone(),
                expected_return,
                volatility,
                sharpe,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optifolio_market_data::PricePoint;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn series(symbol: &str, closes: &[(u32, f64)]) -> AssetSeries {
        AssetSeries::new(
            symbol,
            closes
                .iter()
                .map(|&(d, close)| PricePoint {
                    date: date(d),
                    close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_single_asset_is_insufficient() {
        let result =
            ReturnMatrix::from_series(&[series("AAA", &[(1, 100.0), (2, 101.0), (3, 102.0)])]);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientAssets { count: 1 })
        ));
    }

    #[test]
    fn test_fewer_than_three_overlapping_dates_is_insufficient() {
        let a = series("AAA", &[(1, 100.0), (2, 101.0), (3, 102.0)]);
        let b = series("BBB", &[(3, 50.0), (4, 51.0), (5, 52.0)]);
        let result = ReturnMatrix::from_series(&[a, b]);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientHistory { aligned: 1 })
        ));
    }

    #[test]
    fn test_alignment_drops_dates_missing_from_any_series() {
        // AAA misses day 3, BBB misses day 4; days 1, 2, 5 survive.
        let a = series("AAA", &[(1, 100.0), (2, 102.0), (4, 99.0), (5, 103.0)]);
        let b = series("BBB", &[(1, 50.0), (2, 51.0), (3, 52.0), (5, 54.0)]);
        let matrix = ReturnMatrix::from_series(&[a, b]).unwrap();
        assert_eq!(matrix.period_count(), 2);
        assert_eq!(matrix.asset_count(), 2);
        // First period: day 1 -> day 2.
        assert_relative_eq!(matrix.returns()[(0, 0)], 0.02, epsilon = 1e-12);
        assert_relative_eq!(matrix.returns()[(0, 1)], 0.02, epsilon = 1e-12);
        // Second period: day 2 -> day 5, the intermediate days are gone.
        assert_relative_eq!(
            matrix.returns()[(1, 0)],
            103.0 / 102.0 - 1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            matrix.returns()[(1, 1)],
            54.0 / 51.0 - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_mean_and_covariance_are_annualized() {
        // AAA returns +1% then +3%; BBB returns +2% then -2%.
        let a = series("AAA", &[(1, 100.0), (2, 101.0), (3, 104.03)]);
        let b = series("BBB", &[(1, 200.0), (2, 204.0), (3, 199.92)]);
        let matrix = ReturnMatrix::from_series(&[a, b]).unwrap();
        let stats = RiskStats::from_returns(&matrix, 252.0);

        assert_relative_eq!(stats.mean_returns[0], 0.02 * 252.0, epsilon = 1e-9);
        assert_relative_eq!(stats.mean_returns[1], 0.0 * 252.0, epsilon = 1e-9);

        // Sample variance of AAA: ((0.01-0.02)^2 + (0.03-0.02)^2) / 1.
        assert_relative_eq!(stats.covariance[(0, 0)], 2e-4 * 252.0, epsilon = 1e-9);
        // Covariance: (-0.01 * 0.02 + 0.01 * -0.02) / 1.
        assert_relative_eq!(stats.covariance[(0, 1)], -4e-4 * 252.0, epsilon = 1e-9);
        assert_eq!(stats.covariance[(0, 1)], stats.covariance[(1, 0)]);
    }

    #[test]
    fn test_asset_performance_reports_per_symbol_sharpe() {
        let a = series("AAA", &[(1, 100.0), (2, 101.0), (3, 104.03)]);
        let b = series("BBB", &[(1, 200.0), (2, 204.0), (3, 199.92)]);
        let matrix = ReturnMatrix::from_series(&[a, b]).unwrap();
        let stats = RiskStats::from_returns(&matrix, 252.0);

        let perf = asset_performance(&stats, 0.0);
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].symbol, "AAA");
        assert_relative_eq!(
            perf[0].volatility,
            (2e-4_f64 * 252.0).sqrt(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            perf[0].sharpe,
            perf[0].expected_return / perf[0].volatility,
            epsilon = 1e-9
        );
        // Zero mean return, positive volatility.
        assert_relative_eq!(perf[1].sharpe, 0.0, epsilon = 1e-9);
    }
}
