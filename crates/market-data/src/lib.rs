//! Stockdesk Market Data Crate
//!
//! This crate is the only place in Stockdesk that talks to the outside world
//! for prices. Everything above it sees a [`PriceLookup`] that answers
//! "latest price for this symbol" with either [`PriceResult::Available`] or
//! [`PriceResult::Unavailable`] and never fails.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Valuation /     |   (stockdesk-core)
//! |  Rebalancer      |
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | CachedPriceLookup|   (TTL cache, one in-flight call per symbol, timeout)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  SymbolResolver  |   (user symbol -> vendor symbol)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |   (Yahoo, Manual)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Latest quote returned by a provider
//! - [`PriceResult`] - Failure-free lookup result handed to the domain layer
//! - [`MarketDataProvider`] - Trait implemented by every price source
//! - [`PriceLookup`] - Trait consumed by the valuation engine and rebalancer

pub mod errors;
pub mod lookup;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::MarketDataError;
pub use lookup::{CachedPriceLookup, PriceLookup, PriceLookupConfig};
pub use models::{PriceResult, Quote};
pub use provider::manual::ManualProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
pub use resolver::SymbolResolver;
