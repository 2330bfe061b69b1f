//! HTTP surface for the portfolio optimizer.
//!
//! Thin presentation layer over `optifolio-core` and
//! `optifolio-market-data`: request validation, strategy dispatch and
//! JSON mapping live here; all analytics stay in the core crate.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use main_lib::{build_state, init_tracing, AppState};
