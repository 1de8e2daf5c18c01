//! Stockdesk Core - holdings, valuation, rules and baskets.
//!
//! This crate holds the domain logic of Stockdesk. It knows nothing about
//! HTTP; prices come in through the [`PriceLookup`] trait from
//! `stockdesk-market-data`, which never fails.

pub mod baskets;
pub mod errors;
pub mod holdings;
pub mod notes;
pub mod reference;
pub mod rules;
pub mod valuation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use stockdesk_market_data::{PriceLookup, PriceResult};
