use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
    #[serde(rename = "n", default)]
    pub trade_count: Option<u64>,
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
}

impl From<AlpacaBar> for Bar {
    fn from(ab: AlpacaBar) -> Self {
        Bar {
            timestamp: ab.timestamp,
            open: ab.open,
            high: ab.high,
            low: ab.low,
            close: ab.close,
            volume: ab.volume,
            trade_count: ab.trade_count,
            vwap: ab.vwap,
        }
    }
}

/// One page of the multi-symbol bars endpoint. `bars` is `null` or `{}`
/// when nothing matched.
#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    #[serde(default)]
    pub bars: Option<IndexMap<String, Vec<AlpacaBar>>>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_with_optional_fields() {
        let raw = r#"{
            "bars": {
                "AAPL": [
                    {"t": "2025-03-07T09:00:00Z", "o": 238.1, "h": 238.9, "l": 237.6, "c": 238.4, "v": 15230, "n": 412, "vw": 238.31},
                    {"t": "2025-03-07T09:01:00Z", "o": 238.4, "h": 238.5, "l": 238.2, "c": 238.3, "v": 870}
                ]
            },
            "next_page_token": "QUFQTHxNfDIwMjUtMDMtMDdUMDk6MDE6MDAuMDAwMDAwMDAwWg=="
        }"#;

        let page: AlpacaResponse = serde_json::from_str(raw).unwrap();
        let bars = page.bars.unwrap();
        let aapl = &bars["AAPL"];

        assert_eq!(aapl.len(), 2);
        assert_eq!(aapl[0].trade_count, Some(412));
        assert_eq!(aapl[1].trade_count, None);
        assert_eq!(aapl[1].vwap, None);
        assert!(page.next_page_token.is_some());

        let bar: Bar = bars.into_iter().next().unwrap().1.remove(0).into();
        assert_eq!(bar.volume, 15230);
        assert_eq!(bar.vwap, Some(238.31));
    }

    #[test]
    fn parses_empty_and_null_pages() {
        let page: AlpacaResponse =
            serde_json::from_str(r#"{"bars": {}, "next_page_token": null}"#).unwrap();
        assert!(page.bars.unwrap().is_empty());

        let page: AlpacaResponse =
            serde_json::from_str(r#"{"bars": null, "next_page_token": null}"#).unwrap();
        assert!(page.bars.is_none());
        assert!(page.next_page_token.is_none());
    }
}
