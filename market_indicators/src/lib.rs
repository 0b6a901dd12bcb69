//! Technical indicators (SMA, EMA, ADR, dollar volume) and premarket
//! session summaries over brokerage price bars.
//!
//! The [`indicators`] and [`premarket`] modules are pure functions of a
//! [`BarSeries`](models::bar_series::BarSeries). Market data reaches them
//! through the [`DataProvider`](providers::DataProvider) contract, which the
//! [`analysis`] module drives.

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod indicators;
pub mod models;
pub mod premarket;
pub mod providers;
