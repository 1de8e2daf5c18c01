//! Price lookup: the failure-free boundary between the market data providers
//! and the domain layer.

mod cached_lookup;

pub use cached_lookup::{CachedPriceLookup, PriceLookupConfig};

use async_trait::async_trait;

use crate::models::PriceResult;

/// Resolves the latest price for a user symbol.
///
/// Implementations must not fail: every error is reported as
/// [`PriceResult::Unavailable`].
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn lookup(&self, symbol: &str) -> PriceResult;
}
