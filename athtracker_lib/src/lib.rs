//! Library layer for ATH Tracker: date boundary validation, price series
//! sources, and the all-time-high scan.
//!
//! Wraps the `alphavantage_api` crate and the Yahoo Finance connector behind a
//! single [`SeriesFetcher`] capability so the scan is written once.

pub mod alphavantage;
pub mod config;
pub mod error;
pub mod scanner;
pub mod series;
pub mod validation;
pub mod yahoo;

pub use alphavantage_api;

pub use alphavantage::AlphaVantageFetcher;
pub use config::AlphaVantageConfig;
pub use error::AthError;
pub use scanner::{scan, AthEvent, AthReport};
pub use series::{PriceFormat, PricePoint, Series, SeriesFetcher};
pub use validation::{validate_eod, DateBoundary, EodDate};
pub use yahoo::{YahooClient, YahooError};
