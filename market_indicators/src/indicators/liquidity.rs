use crate::{errors::IndicatorError, models::bar_series::BarSeries};

/// Mean of `close * volume` over the whole series.
///
/// An empty series is an error rather than zero: a zero here would read as
/// a real, very illiquid symbol.
pub fn mean_dollar_volume(series: &BarSeries) -> Result<f64, IndicatorError> {
    if series.is_empty() {
        return Err(IndicatorError::EmptySeries {
            symbol: series.symbol.clone(),
        });
    }
    let total: f64 = series.bars().iter().map(|b| b.dollar_volume()).sum();
    Ok(total / series.len() as f64)
}
