//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the narrow contract the
//! indicator and premarket code fetch bars through. Each concrete vendor
//! (currently Alpaca, see [`alpaca_rest`]) implements it and owns its own
//! transport, authentication and rate limiting.
//!
//! A provider handle is constructed once by the caller and passed by
//! reference to whatever needs market data.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_indicators::models::{
//!     bar_series::BarSeries,
//!     request_params::BarsRequestParams,
//! };
//! use market_indicators::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod alpaca_rest;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{
    asset::AssetClass,
    bar_series::{BarSeries, SeriesError},
    request_params::{BarsRequestParams, ProviderParams},
    timeframe::{TimeFrame, TimeFrameError},
};

/// Trait for fetching time-series bar data from a market data provider.
///
/// Implementations must return each series in strictly increasing timestamp
/// order, or fail. A symbol with no data in the range is either omitted or
/// returned as an empty series.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches time-series bar data for the given request parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BarSeries>)` - One series per symbol that had data.
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;

    /// Fetches one symbol's US-equity bars for `[start, end)`.
    ///
    /// Returns an empty series when the provider has nothing for the window.
    async fn fetch_series(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BarSeries, ProviderError> {
        let params = BarsRequestParams {
            symbols: vec![symbol.to_string()],
            timeframe,
            start,
            end,
            asset_class: AssetClass::UsEquity,
            provider_specific: ProviderParams::None,
        };

        let found = self
            .fetch_bars(params)
            .await?
            .into_iter()
            .find(|s| s.symbol == symbol);
        Ok(found.unwrap_or_else(|| BarSeries::empty(symbol, timeframe)))
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing credentials: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout, bad body).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The requested timeframe is not supported by this provider.
    #[snafu(display("Unsupported timeframe: {source}"))]
    InvalidTimeFrame {
        source: TimeFrameError,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider returned bars that violate the series ordering contract.
    #[snafu(display("Malformed series for {symbol}: {source}"))]
    Malformed {
        symbol: String,
        source: SeriesError,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}
