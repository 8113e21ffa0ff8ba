//! [`SeriesFetcher`] backed by the Alpha Vantage daily time series.

use alphavantage_api::types::TimeSeriesDaily;
use alphavantage_api::{Client, DailySeriesQuery};
use chrono::NaiveDate;

use crate::config::AlphaVantageConfig;
use crate::error::AthError;
use crate::series::{PriceFormat, PricePoint, Series, SeriesFetcher};

pub struct AlphaVantageFetcher {
    client: Client,
}

impl AlphaVantageFetcher {
    pub fn new(config: &AlphaVantageConfig) -> Self {
        let client = match &config.base_url {
            Some(url) => Client::with_base_url(url, &config.api_key),
            None => Client::new(&config.api_key),
        };
        Self { client }
    }
}

/// Extract `(date, "2. high")` pairs, oldest first.
pub fn series_from_daily(daily: &TimeSeriesDaily) -> Result<Series, AthError> {
    let points = daily
        .bars
        .iter()
        .map(|(date, bar)| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|date| PricePoint::new(date, bar.high))
                .map_err(|e| {
                    AthError::Upstream(alphavantage_api::Error::Parse(format!(
                        "invalid date key '{}': {}",
                        date, e
                    )))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Series::new(points))
}

impl SeriesFetcher for AlphaVantageFetcher {
    fn source_name(&self) -> &'static str {
        "alphavantage"
    }

    fn price_format(&self) -> PriceFormat {
        PriceFormat::Shortest
    }

    async fn fetch_series(&self, symbol: &str) -> Result<Series, AthError> {
        let daily = self
            .client
            .get_daily_series(&DailySeriesQuery::new(symbol))
            .await?;
        let series = series_from_daily(&daily)?;
        tracing::info!("Fetched {} daily bars for {} from Alpha Vantage", series.len(), symbol);
        Ok(series)
    }
}
