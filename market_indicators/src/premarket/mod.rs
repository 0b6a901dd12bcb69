//! Premarket session aggregation.
//!
//! The session runs from 04:00 to 09:30 exchange-local time on the most
//! recent trading day, where a weekend reference date rolls back to Friday.

pub mod calendar;
pub mod summary;

pub use calendar::{CalendarError, last_trading_day, premarket_bounds, trading_day_for};
pub use summary::{PremarketSummary, summarize_premarket, summarize_session};
