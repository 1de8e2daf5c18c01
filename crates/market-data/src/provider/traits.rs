//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source. Providers are
/// free to fail; the cached lookup in front of them turns every failure into
/// `PriceResult::Unavailable`.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockdesk_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         // ... call the vendor API
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO" or "MANUAL".
    /// Used for logging and error messages.
    fn id(&self) -> &'static str;

    /// Whether this provider performs outbound calls at all.
    ///
    /// The server reports this on startup so a manual-pricing session is
    /// visible in the logs.
    fn is_live(&self) -> bool {
        true
    }

    /// Fetch the latest quote for a vendor-format symbol.
    ///
    /// # Returns
    ///
    /// The latest quote on success, or a `MarketDataError` on failure.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
