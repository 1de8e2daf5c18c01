//! Manual pricing: no outbound market data at all.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

/// Provider for sessions without a live feed.
///
/// Every lookup fails with `NotSupported`, so the valuation engine falls back
/// to the CMP the user typed in for each holding.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualProvider;

impl ManualProvider {
    pub fn new() -> Self {
        ManualProvider
    }
}

#[async_trait]
impl MarketDataProvider for ManualProvider {
    fn id(&self) -> &'static str {
        "MANUAL"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "latest_quote".to_string(),
            provider: self.id().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_provider_never_prices() {
        let provider = ManualProvider::new();
        let result = provider.get_latest_quote("INFY.NS").await;
        assert!(matches!(
            result,
            Err(MarketDataError::NotSupported { ref provider, .. }) if provider == "MANUAL"
        ));
        assert!(!provider.is_live());
    }
}
