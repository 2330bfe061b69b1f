use std::{net::SocketAddr, time::Duration};

use optifolio_core::constants::{
    DEFAULT_FRONTIER_SAMPLES, DEFAULT_RISK_FREE_RATE, TRADING_DAYS_PER_YEAR,
};

use crate::models::UniverseEntry;

/// Selectable default universe: the NSE blue chips the service was
/// originally built around. Overridable via `OPTIFOLIO_UNIVERSE`.
const DEFAULT_UNIVERSE: &[(&str, &str)] = &[
    ("RELIANCE.NS", "Reliance Industries"),
    ("TCS.NS", "Tata Consultancy Services"),
    ("HDFCBANK.NS", "HDFC Bank"),
    ("INFY.NS", "Infosys"),
    ("ICICIBANK.NS", "ICICI Bank"),
];

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub fetch_timeout: Duration,
    pub lookback_days: i64,
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
    pub frontier_samples: usize,
    pub universe: Vec<UniverseEntry>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("OPTIFOLIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .expect("Invalid OPTIFOLIO_LISTEN_ADDR");
        let cors_allow = std::env::var("OPTIFOLIO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("OPTIFOLIO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let fetch_timeout_secs: u64 = std::env::var("OPTIFOLIO_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .unwrap_or(30);
        let lookback_days: i64 = std::env::var("OPTIFOLIO_LOOKBACK_DAYS")
            .unwrap_or_else(|_| "365".into())
            .parse()
            .unwrap_or(365);
        let risk_free_rate: f64 = std::env::var("OPTIFOLIO_RISK_FREE_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RISK_FREE_RATE);
        let periods_per_year: f64 = std::env::var("OPTIFOLIO_PERIODS_PER_YEAR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(TRADING_DAYS_PER_YEAR);
        let frontier_samples: usize = std::env::var("OPTIFOLIO_FRONTIER_SAMPLES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FRONTIER_SAMPLES);
        let universe = std::env::var("OPTIFOLIO_UNIVERSE")
            .map(|v| parse_universe(&v))
            .ok()
            .filter(|u: &Vec<UniverseEntry>| !u.is_empty())
            .unwrap_or_else(default_universe);
        Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            lookback_days,
            risk_free_rate,
            periods_per_year,
            frontier_samples,
            universe,
        }
    }
}

fn default_universe() -> Vec<UniverseEntry> {
    DEFAULT_UNIVERSE
        .iter()
        .map(|&(symbol, name)| UniverseEntry {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Parse `SYMBOL=Display Name,SYMBOL2=Other Name`; entries without a
/// name use the symbol itself.
fn parse_universe(raw: &str) -> Vec<UniverseEntry> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((symbol, name)) => UniverseEntry {
                symbol: symbol.trim().to_string(),
                name: name.trim().to_string(),
            },
            None => UniverseEntry {
                symbol: entry.to_string(),
                name: entry.to_string(),
            },
        })
        .collect()
}
