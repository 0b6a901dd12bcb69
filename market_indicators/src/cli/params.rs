use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("no symbols given")]
    NoSymbols,

    #[error("invalid reference time `{input}`: {message}")]
    InvalidTime { input: String, message: String },
}

/// Splits a comma-separated symbol list, trimming and upper-casing entries.
pub fn parse_symbols(raw: &str) -> Result<Vec<String>, ParamError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(ParamError::NoSymbols);
    }
    Ok(symbols)
}

/// Parses an RFC 3339 reference time, or returns the current time.
pub fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>, ParamError> {
    match raw {
        None => Ok(Utc::now()),
        Some(input) => DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ParamError::InvalidTime {
                input: input.to_string(),
                message: e.to_string(),
            }),
    }
}
