use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::America::New_York;
use market_indicators::{
    analysis::{analyze_symbol, premarket_report},
    config::AnalysisConfig,
    errors::{Error, IndicatorError},
    models::{
        bar::Bar,
        bar_series::BarSeries,
        request_params::BarsRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{DataProvider, ProviderError, ValidationSnafu},
};

/// Serves canned daily and minute bars, trimmed to the requested range, and
/// records every request.
#[derive(Default)]
struct MockProvider {
    daily: Vec<Bar>,
    minute: Vec<Bar>,
    fail: bool,
    requests: Mutex<Vec<BarsRequestParams>>,
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        self.requests.lock().unwrap().push(params.clone());
        if self.fail {
            return ValidationSnafu {
                message: "mock failure",
            }
            .fail();
        }

        let source = match params.timeframe.unit {
            TimeFrameUnit::Day => &self.daily,
            _ => &self.minute,
        };
        let bars: Vec<Bar> = source
            .iter()
            .filter(|b| b.timestamp >= params.start && b.timestamp < params.end)
            .cloned()
            .collect();
        if bars.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![
            BarSeries::new(params.symbols[0].clone(), params.timeframe, bars).unwrap(),
        ])
    }
}

fn ny(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// 30 consecutive calendar days of daily bars ending Friday 2025-03-07,
/// closes 1..=30, constant range of 2.
fn daily_bars() -> Vec<Bar> {
    let last = ny(2025, 3, 7, 0, 0);
    (0..30)
        .map(|i| {
            let close = (i + 1) as f64;
            Bar::new(last - Duration::days(29 - i), close, close + 1.0, close - 1.0, close, 100)
        })
        .collect()
}

/// Friday premarket bars plus a regular-hours bar the summary must ignore.
fn minute_bars() -> Vec<Bar> {
    vec![
        Bar::new(ny(2025, 3, 7, 4, 0), 10.0, 10.4, 9.9, 10.2, 300),
        Bar::new(ny(2025, 3, 7, 7, 45), 10.2, 10.9, 10.1, 10.8, 500),
        Bar::new(ny(2025, 3, 7, 9, 29), 10.8, 10.8, 10.4, 10.5, 200),
        Bar::new(ny(2025, 3, 7, 9, 30), 10.5, 12.0, 10.5, 11.9, 9_000),
    ]
}

fn sunday_noon() -> DateTime<Utc> {
    ny(2025, 3, 9, 12, 0)
}

#[tokio::test]
async fn analyze_symbol_builds_full_report() {
    let provider = MockProvider {
        daily: daily_bars(),
        minute: minute_bars(),
        ..Default::default()
    };

    let report = analyze_symbol(&provider, "AAPL", sunday_noon(), &AnalysisConfig::default())
        .await
        .unwrap();

    let snap = &report.snapshot;
    assert_eq!(snap.symbol, "AAPL");
    assert_eq!(snap.bar_count, 30);
    assert_eq!(snap.close, 30.0);
    // Mean of closes 11..=30.
    assert_eq!(snap.sma, Some(20.5));
    assert_eq!(snap.adr, Some(2.0));
    assert!(snap.ema > 20.5 && snap.ema < 30.0);
    // Mean of close * 100 over closes 1..=30.
    assert_eq!(snap.mean_dollar_volume, 1_550.0);

    let pm = report.premarket.summary.as_ref().unwrap();
    assert_eq!(pm.trading_day.to_string(), "2025-03-07");
    assert_eq!(pm.bar_count, 3);
    assert_eq!(pm.open, 10.0);
    assert_eq!(pm.high, 10.9);
    assert_eq!(pm.low, 9.9);
    assert_eq!(pm.close, 10.5);
    assert_eq!(pm.volume, 1_000);
    assert!((pm.percent_change - 5.0).abs() < 1e-9);

    let text = report.to_string();
    assert!(text.contains("ANALYZING AAPL"));
    assert!(text.contains("SMA20:            $20.50"));
    assert!(text.contains("Change:           +5.00%"));
}

#[tokio::test]
async fn requests_cover_lookback_and_premarket_window() {
    let provider = MockProvider {
        daily: daily_bars(),
        minute: minute_bars(),
        ..Default::default()
    };
    let now = sunday_noon();

    analyze_symbol(&provider, "AAPL", now, &AnalysisConfig::default())
        .await
        .unwrap();

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);

    let daily = &requests[0];
    assert_eq!(daily.timeframe, TimeFrame::day());
    assert_eq!(daily.end, now);
    assert_eq!(daily.start, now - Duration::days(90));

    let premarket = &requests[1];
    assert_eq!(premarket.timeframe, TimeFrame::minute());
    assert_eq!(premarket.start, ny(2025, 3, 7, 4, 0));
    assert_eq!(premarket.end, ny(2025, 3, 7, 9, 30));
}

#[tokio::test]
async fn empty_daily_series_is_an_indicator_error() {
    let provider = MockProvider {
        minute: minute_bars(),
        ..Default::default()
    };

    let err = analyze_symbol(&provider, "ZZZZ", sunday_noon(), &AnalysisConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Indicator(IndicatorError::EmptySeries { ref symbol }) if symbol == "ZZZZ"
    ));
}

#[tokio::test]
async fn missing_premarket_is_reported_not_raised() {
    let provider = MockProvider {
        daily: daily_bars(),
        ..Default::default()
    };

    let report = premarket_report(&provider, "AAPL", sunday_noon(), New_York)
        .await
        .unwrap();
    assert!(report.summary.is_none());
    assert!(report.to_string().contains("No premarket data available"));
}

#[tokio::test]
async fn short_history_leaves_sma_and_adr_undefined() {
    let provider = MockProvider {
        daily: daily_bars().split_off(25),
        minute: minute_bars(),
        ..Default::default()
    };

    let report = analyze_symbol(&provider, "AAPL", sunday_noon(), &AnalysisConfig::default())
        .await
        .unwrap();
    assert_eq!(report.snapshot.bar_count, 5);
    assert_eq!(report.snapshot.sma, None);
    assert_eq!(report.snapshot.adr, None);
    assert!(report.to_string().contains("SMA20:            $n/a"));
}

#[tokio::test]
async fn provider_failures_propagate() {
    let provider = MockProvider {
        fail: true,
        ..Default::default()
    };

    let err = analyze_symbol(&provider, "AAPL", sunday_noon(), &AnalysisConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Provider(ProviderError::Validation { .. })));
}
