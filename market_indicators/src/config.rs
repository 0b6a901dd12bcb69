//! Runtime configuration, read from an optional TOML file.
//!
//! ```toml
//! [analysis]
//! timezone = "America/New_York"
//! daily_lookback_days = 90
//!
//! [analysis.windows]
//! sma = 20
//! ema = 20
//! adr = 14
//!
//! [alpaca]
//! data_url = "https://data.alpaca.markets/v2/stocks/bars"
//! feed = "sip"
//! adjustment = "raw"
//! requests_per_minute = 200
//! ```
//!
//! Every key has a default, so an absent file or section is fine.
//! Credentials are never read from this file; see
//! [`AlpacaProvider::new`](crate::providers::alpaca_rest::provider::AlpacaProvider::new).

use std::{num::NonZeroU32, path::Path};

use chrono_tz::Tz;
use nonzero_ext::nonzero;
use serde::Deserialize;
use shared_utils::config::{ConfigError, load_toml};

use crate::{
    indicators::IndicatorWindows,
    providers::alpaca_rest::params::{Adjustment, Feed},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub alpaca: AlpacaConfig,
}

impl Config {
    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path)?;
        config.analysis.timezone()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// IANA name of the exchange time zone.
    pub timezone: String,
    /// Calendar days of daily bars to fetch, regardless of weekday.
    pub daily_lookback_days: u32,
    pub windows: IndicatorWindows,
}

impl AnalysisConfig {
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|e| ConfigError::Invalid {
            key: "analysis.timezone".into(),
            message: e.to_string(),
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".into(),
            daily_lookback_days: 90,
            windows: IndicatorWindows::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    /// Multi-symbol stock bars endpoint.
    pub data_url: String,
    pub feed: Feed,
    pub adjustment: Adjustment,
    pub requests_per_minute: NonZeroU32,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            data_url: "https://data.alpaca.markets/v2/stocks/bars".into(),
            feed: Feed::Sip,
            adjustment: Adjustment::Raw,
            requests_per_minute: nonzero!(200u32),
        }
    }
}
