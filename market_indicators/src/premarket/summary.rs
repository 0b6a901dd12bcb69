use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::{bar::Bar, bar_series::BarSeries};

use super::calendar::{PREMARKET_CLOSE_SECS, PREMARKET_OPEN_SECS, trading_day_for};

/// OHLCV aggregate of one premarket session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremarketSummary {
    pub trading_day: NaiveDate,
    pub bar_count: usize,
    /// Open of the first bar in the session.
    pub open: f64,
    pub high: f64,
    pub low: f64,
    /// Close of the last bar in the session.
    pub close: f64,
    pub volume: u64,
    /// `(close - open) / open * 100`.
    pub percent_change: f64,
}

impl PremarketSummary {
    /// Aggregates `bars`, which must be non-empty and chronological.
    fn from_bars(trading_day: NaiveDate, bars: &[&Bar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;

        let (high, low, volume) = bars.iter().fold(
            (f64::NEG_INFINITY, f64::INFINITY, 0u64),
            |(high, low, volume), b| (high.max(b.high), low.min(b.low), volume + b.volume),
        );

        Some(Self {
            trading_day,
            bar_count: bars.len(),
            open: first.open,
            high,
            low,
            close: last.close,
            volume,
            percent_change: percent_change(first.open, last.close),
        })
    }
}

/// Arithmetic percent change from `old` to `new`.
pub fn percent_change(old: f64, new: f64) -> f64 {
    (new - old) / old * 100.0
}

fn in_session(bar: &Bar, day: NaiveDate, tz: Tz) -> bool {
    let local = bar.timestamp.with_timezone(&tz);
    let secs = local.num_seconds_from_midnight();
    local.date_naive() == day && (PREMARKET_OPEN_SECS..PREMARKET_CLOSE_SECS).contains(&secs)
}

/// Summarizes the bars of `series` that fall in `[04:00, 09:30)` local time
/// on `day`. Returns `None` when no bar falls in the session.
pub fn summarize_session(series: &BarSeries, day: NaiveDate, tz: Tz) -> Option<PremarketSummary> {
    let bars: Vec<&Bar> = series
        .bars()
        .iter()
        .filter(|b| in_session(b, day, tz))
        .collect();
    PremarketSummary::from_bars(day, &bars)
}

/// Summarizes the premarket session of the most recent trading day as of
/// `now` (weekends roll back to Friday).
pub fn summarize_premarket(
    series: &BarSeries,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<PremarketSummary> {
    summarize_session(series, trading_day_for(now, tz), tz)
}
