//! Response types for the Alpha Vantage daily time series.
//!
//! Alpha Vantage labels every field with an ordinal prefix (`"2. high"`) and
//! encodes numbers as decimal strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(rename = "1. Information")]
    pub information: String,
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: String,
    #[serde(rename = "4. Output Size")]
    pub output_size: String,
    #[serde(rename = "5. Time Zone")]
    pub time_zone: String,
}

/// One trading day. Prices are unadjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open", deserialize_with = "de_decimal")]
    pub open: f64,
    #[serde(rename = "2. high", deserialize_with = "de_decimal")]
    pub high: f64,
    #[serde(rename = "3. low", deserialize_with = "de_decimal")]
    pub low: f64,
    #[serde(rename = "4. close", deserialize_with = "de_decimal")]
    pub close: f64,
    #[serde(rename = "5. volume", deserialize_with = "de_decimal")]
    pub volume: f64,
}

/// Successful `TIME_SERIES_DAILY` payload.
///
/// Bars are keyed by `YYYY-MM-DD`. The provider sends them newest first; the
/// `BTreeMap` iterates them oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesDaily {
    #[serde(rename = "Meta Data")]
    pub meta: MetaData,
    #[serde(rename = "Time Series (Daily)")]
    pub bars: BTreeMap<String, DailyBar>,
}

impl TimeSeriesDaily {
    /// Top-level key that holds the bars in a successful response.
    pub const SERIES_KEY: &'static str = "Time Series (Daily)";
}

/// The shape Alpha Vantage uses (with HTTP 200) when it refuses a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl ApiMessage {
    /// The first populated message, if any.
    pub fn text(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{}': {}", s, e))),
    }
}
