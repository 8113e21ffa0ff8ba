//! Query builders for the Alpha Vantage `query` endpoint.

use std::fmt;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// How much history the API should return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// The latest 100 data points.
    Compact,
    /// The full-length history (20+ years for most listings). This is the default.
    #[default]
    Full,
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Compact => write!(f, "compact"),
            OutputSize::Full => write!(f, "full"),
        }
    }
}

/// Query for `function=TIME_SERIES_DAILY`: raw daily OHLCV bars for one symbol.
#[derive(Clone, Debug)]
pub struct DailySeriesQuery {
    pub symbol: String,
    pub output_size: OutputSize,
}

impl DailySeriesQuery {
    pub const FUNCTION: &'static str = "TIME_SERIES_DAILY";

    /// Creates a query for the full daily history of `symbol`.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            output_size: OutputSize::default(),
        }
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }
}

impl Query for DailySeriesQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("function", Self::FUNCTION)
            .append_pair("symbol", &self.symbol)
            .append_pair("outputsize", &self.output_size.to_string());
        url
    }
}
