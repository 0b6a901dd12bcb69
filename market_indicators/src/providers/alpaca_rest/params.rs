use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};

use crate::{
    models::{
        asset::AssetClass,
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    providers::{InvalidTimeFrameSnafu, ProviderError, ValidationSnafu},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Alpaca-specific parameters for a bars request.
///
/// Unset fields fall back to the provider's configured defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Page size; pagination continues until the range is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Checks the timeframe against Alpaca's accepted combinations.
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<(), ProviderError> {
    timeframe.validate().context(InvalidTimeFrameSnafu)
}

/// Rejects requests the stock bars endpoint cannot serve.
pub fn validate_request(params: &BarsRequestParams) -> Result<(), ProviderError> {
    validate_timeframe(&params.timeframe)?;
    ensure!(
        !params.symbols.is_empty(),
        ValidationSnafu {
            message: "at least one symbol is required"
        }
    );
    ensure!(
        params.asset_class == AssetClass::UsEquity,
        ValidationSnafu {
            message: format!("{:?} is not served by the stock bars endpoint", params.asset_class)
        }
    );
    ensure!(
        params.start < params.end,
        ValidationSnafu {
            message: format!("start {} is not before end {}", params.start, params.end)
        }
    );
    Ok(())
}

/// Builds the query string for one page of a bars request.
pub fn construct_params(
    params: &BarsRequestParams,
    defaults: &AlpacaBarsParams,
) -> Vec<(String, String)> {
    let specific = match &params.provider_specific {
        ProviderParams::Alpaca(p) => p,
        ProviderParams::None => defaults,
    };

    let mut query = vec![
        ("symbols".to_string(), params.symbols.join(",")),
        ("timeframe".to_string(), params.timeframe.to_string()),
        (
            "start".to_string(),
            params.start.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "end".to_string(),
            params.end.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ];

    if let Some(adjustment) = specific.adjustment.or(defaults.adjustment) {
        query.push(("adjustment".to_string(), adjustment.as_str().to_string()));
    }
    if let Some(feed) = specific.feed.or(defaults.feed) {
        query.push(("feed".to_string(), feed.as_str().to_string()));
    }
    if let Some(currency) = specific.currency.as_ref().or(defaults.currency.as_ref()) {
        query.push(("currency".to_string(), currency.clone()));
    }
    if let Some(limit) = specific.limit.or(defaults.limit) {
        query.push(("limit".to_string(), limit.to_string()));
    }

    query
}
