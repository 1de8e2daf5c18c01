use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a price lookup.
///
/// `Available` always carries a strictly positive price. Every failure mode
/// (unknown symbol, empty series, network error, timeout) collapses into
/// `Unavailable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "price", rename_all = "camelCase")]
pub enum PriceResult {
    Available(Decimal),
    Unavailable,
}

impl PriceResult {
    /// Builds a result from a raw price, rejecting zero and negative values.
    pub fn from_price(price: Decimal) -> Self {
        if price > Decimal::ZERO {
            PriceResult::Available(price)
        } else {
            PriceResult::Unavailable
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match self {
            PriceResult::Available(price) => Some(*price),
            PriceResult::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceResult::Available(_))
    }
}
