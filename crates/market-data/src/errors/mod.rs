//! Error types for the market data crate.
//!
//! These errors never leave the crate through [`PriceLookup`](crate::PriceLookup):
//! the cached lookup logs them and reports `PriceResult::Unavailable`.
//! Providers and their tests still see them directly.

use thiserror::Error;

/// Errors that can occur while fetching a quote from a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// Retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but the provider returned an empty price series.
    #[error("No data for symbol: {0}")]
    NoData(String),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider does not fetch prices at all (e.g. manual pricing).
    #[error("Operation '{operation}' not supported by provider {provider}")]
    NotSupported {
        /// The operation that was attempted
        operation: String,
        /// The provider that rejected it
        provider: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the failure says something about the symbol itself rather than
    /// about the provider being reachable. Used to pick the log level.
    pub fn is_symbol_error(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound(_) | Self::NoData(_) | Self::ValidationFailed { .. }
        )
    }
}
