use std::num::NonZeroUsize;

use crate::{errors::IndicatorError, models::bar_series::BarSeries};

use super::trailing;

/// Mean of `high - low` over the trailing `window` bars.
pub fn average_daily_range(series: &BarSeries, window: NonZeroUsize) -> Result<f64, IndicatorError> {
    let bars = trailing(series, window.get())?;
    Ok(bars.iter().map(|b| b.range()).sum::<f64>() / window.get() as f64)
}

/// Mean of `(high - low) / low * 100` over the trailing `window` bars.
///
/// Bars with a non-positive low carry no meaningful percentage and are left
/// out of the mean.
pub fn average_daily_range_percent(
    series: &BarSeries,
    window: NonZeroUsize,
) -> Result<f64, IndicatorError> {
    let bars = trailing(series, window.get())?;
    let pcts: Vec<f64> = bars
        .iter()
        .filter(|b| b.low > 0.0)
        .map(|b| b.range() / b.low * 100.0)
        .collect();

    if pcts.is_empty() {
        return Err(IndicatorError::InsufficientWindow {
            window: window.get(),
            available: 0,
        });
    }
    Ok(pcts.iter().sum::<f64>() / pcts.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::daily;
    use nonzero_ext::nonzero;

    #[test]
    fn constant_range_gives_exact_adr() {
        let rows: Vec<_> = (0..20)
            .map(|i| {
                let low = 10.0 + i as f64;
                (low + 1.0, low + 2.0, low, low + 1.5, 500)
            })
            .collect();
        let series = daily(&rows);
        assert_eq!(average_daily_range(&series, nonzero!(14usize)), Ok(2.0));
    }

    #[test]
    fn adr_only_looks_at_trailing_window() {
        let series = daily(&[
            (1.0, 100.0, 1.0, 50.0, 1),
            (10.0, 11.0, 10.0, 10.5, 1),
            (10.0, 13.0, 10.0, 12.0, 1),
        ]);
        assert_eq!(average_daily_range(&series, nonzero!(2usize)), Ok(2.0));
    }

    #[test]
    fn adr_needs_full_window() {
        let series = daily(&[(10.0, 12.0, 10.0, 11.0, 1); 13]);
        assert_eq!(
            average_daily_range(&series, nonzero!(14usize)),
            Err(IndicatorError::InsufficientWindow {
                window: 14,
                available: 13
            })
        );
    }

    #[test]
    fn adr_percent_is_relative_to_low() {
        let series = daily(&[(10.0, 11.0, 10.0, 10.5, 1), (20.0, 25.0, 20.0, 22.0, 1)]);
        let got = average_daily_range_percent(&series, nonzero!(2usize)).unwrap();
        assert!((got - 17.5).abs() < 1e-9, "got {got}");
    }

    #[test]
    fn adr_percent_skips_zero_lows() {
        let series = daily(&[(0.0, 1.0, 0.0, 0.5, 1)]);
        assert!(average_daily_range_percent(&series, nonzero!(1usize)).is_err());
    }
}
