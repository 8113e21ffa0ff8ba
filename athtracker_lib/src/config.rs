//! Environment-sourced configuration for the price sources.

use crate::error::AthError;

pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_KEY";
pub const BASE_URL_VAR: &str = "ALPHA_VANTAGE_BASE_URL";

/// Settings for the Alpha Vantage source.
#[derive(Clone)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    /// Overrides the production endpoint, e.g. to point at a mock server.
    pub base_url: Option<String>,
}

impl std::fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AlphaVantageConfig {
    /// Read `ALPHA_VANTAGE_KEY` and `ALPHA_VANTAGE_BASE_URL` from the process environment.
    pub fn from_env() -> Result<Self, AthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());
        let api_key = non_empty(API_KEY_VAR).ok_or(AthError::ConfigurationMissing(API_KEY_VAR))?;
        Ok(Self {
            api_key,
            base_url: non_empty(BASE_URL_VAR),
        })
    }
}
