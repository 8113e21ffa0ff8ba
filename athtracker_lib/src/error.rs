//! Error types for the library layer.

use std::fmt;

use crate::yahoo::YahooError;

/// Errors produced by the library layer, wrapping the two price sources and
/// adding input validation, configuration, and empty-data failures.
#[derive(Debug)]
pub enum AthError {
    /// A user-supplied end date was malformed or out of range. Carries the input as given.
    InvalidArgument(String),
    /// A required environment variable was absent or empty.
    ConfigurationMissing(&'static str),
    /// An error from the Alpha Vantage client.
    Upstream(alphavantage_api::Error),
    /// An error from the Yahoo Finance connector.
    Yahoo(YahooError),
    /// The source returned no price history for the symbol.
    EmptySeries(String),
}

impl fmt::Display for AthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(input) => {
                write!(f, "'{}' is not a valid date in YYYY-MM-DD format", input)
            }
            Self::ConfigurationMissing(var) => {
                write!(f, "{} not found in environment variables", var)
            }
            Self::Upstream(e) => write!(f, "Alpha Vantage error: {}", e),
            Self::Yahoo(e) => write!(f, "Yahoo Finance error: {}", e),
            Self::EmptySeries(symbol) => write!(f, "No price history returned for {}", symbol),
        }
    }
}

impl std::error::Error for AthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            Self::Yahoo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<alphavantage_api::Error> for AthError {
    fn from(e: alphavantage_api::Error) -> Self {
        Self::Upstream(e)
    }
}

impl From<YahooError> for AthError {
    fn from(e: YahooError) -> Self {
        Self::Yahoo(e)
    }
}
