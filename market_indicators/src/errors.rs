use thiserror::Error;

use crate::{premarket::CalendarError, providers::ProviderError};

/// Deterministic failures of the indicator computations.
///
/// Each variant is a function of the input series alone; the engine never
/// retries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// The indicator needs at least one bar.
    #[error("no bars available for {symbol}")]
    EmptySeries { symbol: String },

    /// A trailing-window indicator was asked for more history than exists.
    #[error("window of {window} bars requested but only {available} available")]
    InsufficientWindow { window: usize, available: usize },
}

/// The unified error type for the `market_indicators` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching bars from the data provider failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An indicator could not be computed from the fetched series.
    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    /// The premarket window could not be placed on the exchange calendar.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] shared_utils::config::ConfigError),
}
