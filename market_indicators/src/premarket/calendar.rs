use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

/// Session open, seconds after local midnight (04:00).
pub const PREMARKET_OPEN_SECS: u32 = 4 * 3600;
/// Session close, seconds after local midnight (09:30). Exclusive.
pub const PREMARKET_CLOSE_SECS: u32 = 9 * 3600 + 30 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("local time {naive} does not exist in {tz}")]
    Nonexistent { naive: NaiveDateTime, tz: Tz },

    #[error("local time {naive} is ambiguous in {tz}")]
    Ambiguous { naive: NaiveDateTime, tz: Tz },
}

/// Rolls a weekend date back to the preceding Friday.
///
/// Exchange holidays are not considered.
pub fn last_trading_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}

/// The trading day whose premarket session is "current" at `now`, judged by
/// the exchange-local calendar date.
pub fn trading_day_for(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    last_trading_day(now.with_timezone(&tz).date_naive())
}

/// UTC instants of 04:00 and 09:30 local time on `day`.
pub fn premarket_bounds(
    day: NaiveDate,
    tz: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>), CalendarError> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    let open = midnight + Duration::seconds(PREMARKET_OPEN_SECS.into());
    let close = midnight + Duration::seconds(PREMARKET_CLOSE_SECS.into());
    Ok((to_utc(open, tz)?, to_utc(close, tz)?))
}

fn to_utc(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, CalendarError> {
    let local = tz.from_local_datetime(&naive);
    match (local.single(), local.earliest()) {
        (Some(dt), _) => Ok(dt.with_timezone(&Utc)),
        (None, Some(_)) => Err(CalendarError::Ambiguous { naive, tz }),
        (None, None) => Err(CalendarError::Nonexistent { naive, tz }),
    }
}
