//! Market data models
//!
//! - `quote` - Quote returned by providers (Quote)
//! - `price` - Failure-free lookup result handed to the domain layer (PriceResult)

mod price;
mod quote;

pub use price::PriceResult;
pub use quote::Quote;
