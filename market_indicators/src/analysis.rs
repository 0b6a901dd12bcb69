//! Fetch-then-compute glue between a [`DataProvider`] and the pure
//! indicator and premarket functions, plus the printable reports.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::AnalysisConfig,
    errors::Error,
    indicators::IndicatorSnapshot,
    models::timeframe::TimeFrame,
    premarket::{PremarketSummary, premarket_bounds, summarize_session, trading_day_for},
    providers::DataProvider,
};

const RULE_HEAVY: &str = "==================================================";
const RULE_LIGHT: &str = "--------------------------------------------------";

/// Premarket outcome for one symbol and trading day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremarketReport {
    pub symbol: String,
    pub trading_day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `None` when the session had no bars.
    pub summary: Option<PremarketSummary>,
}

/// Daily indicators plus the premarket session of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub snapshot: IndicatorSnapshot,
    pub premarket: PremarketReport,
}

/// Fetches one-minute bars for the current premarket session and summarizes them.
pub async fn premarket_report<P: DataProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<PremarketReport, Error> {
    let trading_day = trading_day_for(now, tz);
    let (start, end) = premarket_bounds(trading_day, tz)?;
    info!(%symbol, %trading_day, %start, %end, "fetching premarket bars");

    let series = provider
        .fetch_series(symbol, TimeFrame::minute(), start, end)
        .await?;
    let summary = summarize_session(&series, trading_day, tz);
    if summary.is_none() {
        warn!(%symbol, %trading_day, "no premarket data");
    }

    Ok(PremarketReport {
        symbol: symbol.to_string(),
        trading_day,
        start,
        end,
        summary,
    })
}

/// Computes the daily snapshot and the premarket summary for `symbol`.
///
/// Daily bars cover a fixed calendar span ending at `now`; only the
/// premarket reference date skips weekends.
pub async fn analyze_symbol<P: DataProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Result<SymbolReport, Error> {
    let tz = config.timezone()?;
    let start = now - Duration::days(config.daily_lookback_days.into());

    let daily = provider
        .fetch_series(symbol, TimeFrame::day(), start, now)
        .await?;
    if daily.is_empty() {
        warn!(%symbol, %start, end = %now, "no daily bars returned");
    }
    let snapshot = IndicatorSnapshot::compute(&daily, config.windows)?;
    let premarket = premarket_report(provider, symbol, now, tz).await?;

    Ok(SymbolReport {
        snapshot,
        premarket,
    })
}

impl fmt::Display for SymbolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.snapshot;
        writeln!(f, "{RULE_HEAVY}")?;
        writeln!(f, "  ANALYZING {}", s.symbol)?;
        writeln!(f, "{RULE_HEAVY}")?;
        writeln!(f, "DAILY DATA ({} bars through {})", s.bar_count, s.as_of.date_naive())?;
        writeln!(f, "{RULE_LIGHT}")?;
        writeln!(f, "  Latest Close:     ${:.2}", s.close)?;
        let sma_label = format!("SMA{}:", s.windows.sma);
        let ema_label = format!("EMA{}:", s.windows.ema);
        writeln!(f, "  {sma_label:<18}${}", money(s.sma))?;
        writeln!(f, "  {ema_label:<18}${:.2}", s.ema)?;
        writeln!(f, "  Dollar Volume:    ${}", thousands(s.mean_dollar_volume))?;
        let adr_label = format!("ADR ({}-day):", s.windows.adr);
        match s.adr_percent {
            Some(pct) => writeln!(f, "  {adr_label:<18}${} ({pct:.2}%)", money(s.adr))?,
            None => writeln!(f, "  {adr_label:<18}${}", money(s.adr))?,
        }
        writeln!(f)?;
        write!(f, "{}", self.premarket)
    }
}

impl fmt::Display for PremarketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PREMARKET DATA ({} {})",
            self.symbol,
            self.trading_day.format("%A, %B %d, %Y")
        )?;
        writeln!(f, "{RULE_LIGHT}")?;
        let Some(pm) = &self.summary else {
            return writeln!(f, "  No premarket data available");
        };
        writeln!(f, "  Bars:             {}", pm.bar_count)?;
        writeln!(f, "  Open:             ${:.2}", pm.open)?;
        writeln!(f, "  High:             ${:.2}", pm.high)?;
        writeln!(f, "  Low:              ${:.2}", pm.low)?;
        writeln!(f, "  Current:          ${:.2}", pm.close)?;
        writeln!(f, "  Change:           {:+.2}%", pm.percent_change)?;
        writeln!(f, "  Volume:           {}", thousands(pm.volume as f64))
    }
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Rounds to a whole number and groups digits by thousands.
fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}
