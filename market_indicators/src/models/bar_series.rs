//! A collection of time-series bars for a specific symbol and timeframe.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{bar::Bar, timeframe::TimeFrame};

/// Violations of the [`BarSeries`] ordering invariant.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("bar {index} at {current} does not come after {previous}")]
    NotStrictlyIncreasing {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// Represents a complete set of time-series data for a single symbol.
///
/// Bars are ordered by strictly increasing timestamp. An empty series means
/// the provider had no data for the requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Builds a series, rejecting bars that are out of order or share a timestamp.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: TimeFrame,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        if let Some((i, pair)) = bars
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(SeriesError::NotStrictlyIncreasing {
                index: i + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }

        Ok(Self {
            symbol: symbol.into(),
            timeframe,
            bars,
        })
    }

    /// A series with no bars.
    pub fn empty(symbol: impl Into<String>, timeframe: TimeFrame) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars: Vec::new(),
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar, if any.
    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// The trailing `n` bars, or `None` when fewer than `n` exist.
    pub fn tail(&self, n: usize) -> Option<&[Bar]> {
        self.bars.len().checked_sub(n).map(|start| &self.bars[start..])
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}
