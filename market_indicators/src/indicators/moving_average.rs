use std::num::NonZeroUsize;

use crate::{errors::IndicatorError, models::bar_series::BarSeries};

use super::trailing;

/// Rolling mean of the closes, one entry per bar.
///
/// Entry `i` is `Some(mean of closes[i + 1 - window ..= i])` once a full
/// window is available and `None` before that; partial windows are never
/// averaged.
pub fn simple_moving_average(series: &BarSeries, window: NonZeroUsize) -> Vec<Option<f64>> {
    let window = window.get();
    let closes: Vec<f64> = series.bars().iter().map(|b| b.close).collect();

    (0..closes.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            })
        })
        .collect()
}

/// SMA at the latest bar.
pub fn latest_simple_moving_average(
    series: &BarSeries,
    window: NonZeroUsize,
) -> Result<f64, IndicatorError> {
    let bars = trailing(series, window.get())?;
    Ok(bars.iter().map(|b| b.close).sum::<f64>() / window.get() as f64)
}

/// Recursive EMA of the closes with `alpha = 2 / (window + 1)`.
///
/// Seeded with the first close, so the output has one entry per bar and is
/// defined for any non-empty series.
pub fn exponential_moving_average(series: &BarSeries, window: NonZeroUsize) -> Vec<f64> {
    let alpha = 2.0 / (window.get() as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());

    for bar in series.bars() {
        let next = match out.last() {
            Some(prev) => alpha * bar.close + (1.0 - alpha) * prev,
            None => bar.close,
        };
        out.push(next);
    }
    out
}

/// EMA at the latest bar.
pub fn latest_exponential_moving_average(
    series: &BarSeries,
    window: NonZeroUsize,
) -> Result<f64, IndicatorError> {
    exponential_moving_average(series, window)
        .last()
        .copied()
        .ok_or_else(|| IndicatorError::EmptySeries {
            symbol: series.symbol.clone(),
        })
}
