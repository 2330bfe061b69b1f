use optifolio_core::{AssetPerformance, PortfolioPoint};
use serde::{Deserialize, Serialize};

/// One selectable asset: a provider symbol plus its display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseEntry {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    EqualWeight,
    MinRisk,
    MaxSharpe,
    Custom,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub tickers: Vec<String>,
    pub strategy: StrategyKind,
    /// Required when `strategy` is `custom`, ignored otherwise.
    pub custom_weights: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub symbols: Vec<String>,
    pub portfolio: PortfolioPoint,
    pub optimal: OptimalPortfolios,
    pub frontier_points: Vec<PortfolioPoint>,
    pub random_points: Vec<PortfolioPoint>,
}

/// Reference portfolios shown alongside whatever the caller picked.
/// Either may be absent when its optimization fails; the requested
/// strategy's result is never silently dropped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalPortfolios {
    pub max_sharpe: Option<PortfolioPoint>,
    pub min_risk: Option<PortfolioPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub assets: Vec<AssetPerformance>,
}
