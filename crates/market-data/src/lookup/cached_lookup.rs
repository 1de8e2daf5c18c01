//! TTL-cached price lookup in front of a market data provider, using moka.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::lookup::PriceLookup;
use crate::models::PriceResult;
use crate::provider::MarketDataProvider;
use crate::resolver::SymbolResolver;

/// Tuning for [`CachedPriceLookup`].
#[derive(Clone, Debug)]
pub struct PriceLookupConfig {
    /// How long a fetched price is served from the cache.
    pub cache_ttl: Duration,
    /// Upper bound for a single provider call.
    pub timeout: Duration,
    /// Maximum number of symbols kept in the cache.
    pub max_capacity: u64,
}

impl Default for PriceLookupConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            max_capacity: 1000,
        }
    }
}

/// Price lookup with a per-symbol TTL cache.
///
/// - A price fetched for a symbol is reused until the TTL elapses, then the
///   next access refetches it.
/// - Concurrent lookups for the same symbol share one provider call.
/// - Failures are not cached; the next lookup tries the provider again.
pub struct CachedPriceLookup {
    provider: Arc<dyn MarketDataProvider>,
    resolver: SymbolResolver,
    cache: Cache<String, Decimal>,
    timeout: Duration,
}

impl CachedPriceLookup {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        resolver: SymbolResolver,
        config: PriceLookupConfig,
    ) -> Self {
        let cache = Cache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self {
            provider,
            resolver,
            cache,
            timeout: config.timeout,
        }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Drop the cached price for one user symbol.
    pub async fn invalidate(&self, symbol: &str) {
        let provider_symbol = self.resolver.to_provider_symbol(symbol);
        self.cache.invalidate(&provider_symbol).await;
    }

    /// Drop every cached price.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of symbols currently cached.
    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    async fn fetch_price(
        provider: Arc<dyn MarketDataProvider>,
        symbol: String,
        timeout: Duration,
    ) -> Result<Decimal, MarketDataError> {
        debug!("Fetching latest price for {} from {}", symbol, provider.id());
        let quote = tokio::time::timeout(timeout, provider.get_latest_quote(&symbol))
            .await
            .map_err(|_| MarketDataError::Timeout {
                provider: provider.id().to_string(),
            })??;

        if quote.close <= Decimal::ZERO {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Non-positive price {} for {}", quote.close, symbol),
            });
        }
        Ok(quote.close)
    }
}

#[async_trait]
impl PriceLookup for CachedPriceLookup {
    async fn lookup(&self, symbol: &str) -> PriceResult {
        let provider_symbol = self.resolver.to_provider_symbol(symbol);
        let init = Self::fetch_price(
            Arc::clone(&self.provider),
            provider_symbol.clone(),
            self.timeout,
        );

        match self.cache.try_get_with(provider_symbol, init).await {
            Ok(price) => PriceResult::from_price(price),
            Err(err) => {
                if err.is_symbol_error() || !self.provider.is_live() {
                    debug!("Price unavailable for {}: {}", symbol, err);
                } else {
                    warn!("Price lookup failed for {}: {}", symbol, err);
                }
                PriceResult::Unavailable
            }
        }
    }
}
