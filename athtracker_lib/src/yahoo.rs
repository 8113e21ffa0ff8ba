//! Yahoo Finance client wrapper for fetching daily price history.
//!
//! Provides [`YahooClient`], a [`SeriesFetcher`] that asks the connector for
//! the longest daily history Yahoo has for a symbol. Bars are dated in the
//! exchange's own timezone, using the `gmtoffset` Yahoo reports with the chart.

use chrono::NaiveDate;
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset};

use crate::error::AthError;
use crate::series::{PriceFormat, PricePoint, Series, SeriesFetcher};

/// Yahoo chart interval for one bar per trading day.
const DAILY_INTERVAL: &str = "1d";
/// Yahoo chart range for all available history.
const MAX_RANGE: &str = "max";

/// Errors from Yahoo Finance operations.
#[derive(Error, Debug)]
pub enum YahooError {
    #[error("Invalid quote timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Invalid exchange UTC offset: {0} seconds")]
    InvalidOffset(i32),
    #[error(transparent)]
    Upstream(#[from] yahoo_finance_api::YahooError),
}

/// Convert a Unix timestamp from a quote to time::OffsetDateTime in UTC.
pub fn timestamp_to_offset_datetime(timestamp: i64) -> Result<OffsetDateTime, YahooError> {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|_| YahooError::InvalidTimestamp(timestamp))
}

/// Turn Yahoo's `gmtoffset` (seconds east of UTC) into a `UtcOffset`.
pub fn exchange_offset(gmtoffset: i32) -> Result<UtcOffset, YahooError> {
    UtcOffset::from_whole_seconds(gmtoffset).map_err(|_| YahooError::InvalidOffset(gmtoffset))
}

/// Convert time::OffsetDateTime to chrono::NaiveDate (calendar date in the value's own offset).
pub fn offset_datetime_to_date(dt: OffsetDateTime) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(dt.year(), dt.month() as u32, u32::from(dt.day()))
}

/// Build a series from `(unix timestamp, high)` bars, dating each bar in
/// `offset`. Bars with a non-finite high are dropped.
pub fn series_from_bars<I>(bars: I, offset: UtcOffset) -> Result<Series, YahooError>
where
    I: IntoIterator<Item = (i64, f64)>,
{
    let mut points = Vec::new();
    for (timestamp, high) in bars {
        if !high.is_finite() {
            tracing::debug!("Skipping bar at {} with non-finite high", timestamp);
            continue;
        }
        let local = timestamp_to_offset_datetime(timestamp)?.to_offset(offset);
        let date = offset_datetime_to_date(local)
            .ok_or(YahooError::InvalidTimestamp(timestamp))?;
        points.push(PricePoint::new(date, high));
    }
    Ok(Series::new(points))
}

/// Daily quotes together with the listing exchange's offset from UTC.
pub struct DailyHistory {
    pub quotes: Vec<yahoo_finance_api::Quote>,
    pub utc_offset: UtcOffset,
}

/// Yahoo Finance client over the `yahoo_finance_api` connector.
pub struct YahooClient {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooClient {
    /// Create a new YahooClient with default configuration.
    pub fn new() -> Result<Self, YahooError> {
        Ok(Self {
            connector: yahoo_finance_api::YahooConnector::new()?,
        })
    }

    /// Fetch every daily quote Yahoo holds for `symbol`.
    pub async fn get_max_history(&self, symbol: &str) -> Result<DailyHistory, YahooError> {
        let response = self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, MAX_RANGE)
            .await?;
        let utc_offset = exchange_offset(response.metadata()?.gmtoffset)?;
        Ok(DailyHistory {
            quotes: response.quotes()?,
            utc_offset,
        })
    }
}

impl SeriesFetcher for YahooClient {
    fn source_name(&self) -> &'static str {
        "yahoo"
    }

    fn price_format(&self) -> PriceFormat {
        PriceFormat::TwoDecimals
    }

    async fn fetch_series(&self, symbol: &str) -> Result<Series, AthError> {
        let history = self.get_max_history(symbol).await?;
        let bars = history.quotes.iter().map(|q| (q.timestamp, q.high));
        let series = series_from_bars(bars, history.utc_offset)?;
        tracing::info!("Fetched {} daily quotes for {} from Yahoo Finance", series.len(), symbol);
        Ok(series)
    }
}
