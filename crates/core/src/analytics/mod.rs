//! Portfolio analytics: returns, risk, strategies and the frontier.

pub mod config;
pub mod frontier;
pub mod models;
pub mod returns;
pub mod solver;
pub mod strategy;
