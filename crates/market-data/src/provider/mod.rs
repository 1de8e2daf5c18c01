//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Concrete provider implementations (Yahoo, Manual)
//!
//! Providers receive vendor-format symbols. Translation from the symbols a
//! user types happens in the resolver module, not in the providers.

mod traits;

pub mod manual;
pub mod yahoo;

pub use traits::MarketDataProvider;
