//! Trend, volatility and liquidity indicators over a [`BarSeries`](crate::models::bar_series::BarSeries).
//!
//! Every function here is pure: it reads the series, returns a value and
//! keeps nothing between calls. Trailing-window indicators (SMA, ADR) are
//! undefined until `window` bars exist, while the EMA is defined from the
//! first bar onward.

pub mod liquidity;
pub mod moving_average;
pub mod range;
pub mod snapshot;

pub use liquidity::mean_dollar_volume;
pub use moving_average::{
    exponential_moving_average, latest_exponential_moving_average,
    latest_simple_moving_average, simple_moving_average,
};
pub use range::{average_daily_range, average_daily_range_percent};
pub use snapshot::{IndicatorSnapshot, IndicatorWindows};

use crate::{
    errors::IndicatorError,
    models::{bar::Bar, bar_series::BarSeries},
};

/// Trailing `window` bars, or the matching error.
fn trailing(series: &BarSeries, window: usize) -> Result<&[Bar], IndicatorError> {
    if series.is_empty() {
        return Err(IndicatorError::EmptySeries {
            symbol: series.symbol.clone(),
        });
    }
    series.tail(window).ok_or(IndicatorError::InsufficientWindow {
        window,
        available: series.len(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};

    use crate::models::{bar::Bar, bar_series::BarSeries, timeframe::TimeFrame};

    /// Daily bars starting 2025-01-02, one per `(open, high, low, close, volume)`.
    pub fn daily(rows: &[(f64, f64, f64, f64, u64)]) -> BarSeries {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 5, 0, 0).unwrap();
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, &(o, h, l, c, v))| Bar::new(start + Duration::days(i as i64), o, h, l, c, v))
            .collect();
        BarSeries::new("TEST", TimeFrame::day(), bars).unwrap()
    }

    /// Daily bars where only the close matters.
    pub fn closes(values: &[f64]) -> BarSeries {
        let rows: Vec<_> = values.iter().map(|&c| (c, c, c, c, 1_000)).collect();
        daily(&rows)
    }
}
