//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or invalid URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not a time series or a recognizable API message.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// Alpha Vantage answered 200 with an error, throttling note, or
    /// information message in place of data.
    #[error("Alpha Vantage returned an error: {0}")]
    Api(String),
}
