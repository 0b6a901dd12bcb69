use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};

use crate::{errors::IndicatorError, models::bar_series::BarSeries};

use super::{
    average_daily_range, average_daily_range_percent, latest_exponential_moving_average,
    latest_simple_moving_average, mean_dollar_volume,
};

/// Lookback windows for the snapshot indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub sma: NonZeroUsize,
    pub ema: NonZeroUsize,
    pub adr: NonZeroUsize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            sma: nonzero!(20usize),
            ema: nonzero!(20usize),
            adr: nonzero!(14usize),
        }
    }
}

/// Indicators evaluated at the latest bar of a series.
///
/// `sma`, `adr` and `adr_percent` are `None` while the series is shorter
/// than their window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    pub as_of: DateTime<Utc>,
    pub bar_count: usize,
    pub close: f64,
    pub sma: Option<f64>,
    pub ema: f64,
    pub adr: Option<f64>,
    pub adr_percent: Option<f64>,
    pub mean_dollar_volume: f64,
    pub windows: IndicatorWindows,
}

impl IndicatorSnapshot {
    pub fn compute(series: &BarSeries, windows: IndicatorWindows) -> Result<Self, IndicatorError> {
        let latest = series.latest().ok_or_else(|| IndicatorError::EmptySeries {
            symbol: series.symbol.clone(),
        })?;

        Ok(Self {
            symbol: series.symbol.clone(),
            as_of: latest.timestamp,
            bar_count: series.len(),
            close: latest.close,
            sma: latest_simple_moving_average(series, windows.sma).ok(),
            ema: latest_exponential_moving_average(series, windows.ema)?,
            adr: average_daily_range(series, windows.adr).ok(),
            adr_percent: average_daily_range_percent(series, windows.adr).ok(),
            mean_dollar_volume: mean_dollar_volume(series)?,
            windows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{closes, daily};

    #[test]
    fn short_series_leaves_window_indicators_undefined() {
        let series = closes(&[10.0, 11.0, 12.0]);
        let snap = IndicatorSnapshot::compute(&series, IndicatorWindows::default()).unwrap();

        assert_eq!(snap.bar_count, 3);
        assert_eq!(snap.close, 12.0);
        assert_eq!(snap.sma, None);
        assert_eq!(snap.adr, None);
        assert!(snap.ema > 10.0 && snap.ema < 12.0);
        assert_eq!(snap.mean_dollar_volume, 11_000.0);
    }

    #[test]
    fn full_series_fills_every_field() {
        let rows: Vec<_> = (0..25).map(|_| (10.0, 12.0, 10.0, 11.0, 1_000)).collect();
        let snap = IndicatorSnapshot::compute(&daily(&rows), IndicatorWindows::default()).unwrap();

        assert_eq!(snap.sma, Some(11.0));
        assert!((snap.ema - 11.0).abs() < 1e-9);
        assert_eq!(snap.adr, Some(2.0));
        assert!((snap.adr_percent.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(snap.mean_dollar_volume, 11_000.0);
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = IndicatorSnapshot::compute(&closes(&[]), IndicatorWindows::default()).unwrap_err();
        assert!(matches!(err, IndicatorError::EmptySeries { .. }));
    }

    #[test]
    fn windows_deserialize_with_defaults() {
        let windows: IndicatorWindows = serde_json::from_value(serde_json::json!({ "sma": 50 })).unwrap();
        assert_eq!(windows.sma.get(), 50);
        assert_eq!(windows.ema.get(), 20);
        assert_eq!(windows.adr.get(), 14);
    }
}
