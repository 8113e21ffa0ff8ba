//! HTTP client for the Alpha Vantage REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{DailySeriesQuery, Query},
    types::{ApiMessage, TimeSeriesDaily},
    Error,
};

/// HTTP client for the Alpha Vantage `query` endpoint.
///
/// Every request carries the API key as the `apikey` query parameter. Each
/// request builds a fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://www.alphavantage.co`.
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client pointing at the production Alpha Vantage API.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url("https://www.alphavantage.co", api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn get_url(&self, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/query", &self.base_api_url).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        let mut url = query.add_to_url(&url);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    async fn get<T, Q>(&self, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                // reqwest includes the URL in its message; strip it so the key stays out of logs.
                tracing::error!("Failed to get resource: {}", e.without_url());
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e.without_url());
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    /// Fetches the daily bars for the query's symbol.
    ///
    /// A 200 response that carries an `Error Message`, `Note` or
    /// `Information` object instead of a series is returned as [`Error::Api`].
    pub async fn get_daily_series(&self, query: &DailySeriesQuery) -> Result<TimeSeriesDaily, Error> {
        tracing::debug!(
            "Requesting {} for {} ({})",
            DailySeriesQuery::FUNCTION,
            query.symbol,
            query.output_size
        );
        let value = self.get::<serde_json::Value, DailySeriesQuery>(query).await?;

        if value.get(TimeSeriesDaily::SERIES_KEY).is_some() {
            return serde_json::from_value::<TimeSeriesDaily>(value).map_err(|e| {
                tracing::error!("Failed to parse daily series for {}: {}", query.symbol, e);
                Error::Parse(e.to_string())
            });
        }

        let message = serde_json::from_value::<ApiMessage>(value).map_err(|e| {
            tracing::error!("Failed to parse response for {}: {}", query.symbol, e);
            Error::Parse(e.to_string())
        })?;
        match message.text() {
            Some(text) => {
                tracing::error!("Alpha Vantage refused request for {}: {}", query.symbol, text);
                Err(Error::Api(text.to_string()))
            }
            None => Err(Error::Parse(
                "response contained neither a time series nor a message".to_string(),
            )),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
