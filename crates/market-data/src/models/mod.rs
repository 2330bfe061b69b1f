//! Data models shared between providers and consumers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Historical closing-price series for one symbol.
///
/// Constructed once per request from a provider response and immutable
/// afterwards. Points are chronologically ordered with no duplicate
/// dates; [`AssetSeries::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl AssetSeries {
    /// Build a series from provider output, sorting by date and keeping
    /// the last point for any duplicated date.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.reverse();
        points.dedup_by_key(|p| p.date);
        points.reverse();
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_sorts_points_by_date() {
        let series = AssetSeries::new(
            "RELIANCE.NS",
            vec![
                PricePoint {
                    date: date(2024, 1, 3),
                    close: 102.0,
                },
                PricePoint {
                    date: date(2024, 1, 1),
                    close: 100.0,
                },
                PricePoint {
                    date: date(2024, 1, 2),
                    close: 101.0,
                },
            ],
        );
        let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
    }

    #[test]
    fn test_new_drops_duplicate_dates_keeping_last() {
        let series = AssetSeries::new(
            "TCS.NS",
            vec![
                PricePoint {
                    date: date(2024, 1, 1),
                    close: 100.0,
                },
                PricePoint {
                    date: date(2024, 1, 1),
                    close: 105.0,
                },
                PricePoint {
                    date: date(2024, 1, 2),
                    close: 101.0,
                },
            ],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].close, 105.0);
    }

    #[test]
    fn test_empty_series() {
        let series = AssetSeries::new("INFY.NS", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.symbol(), "INFY.NS");
    }
}
