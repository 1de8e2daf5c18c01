//! Basket domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::valuation::checked_sum;

/// A stock and its target weight inside a basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketConstituent {
    pub symbol: String,
    pub weight_percent: Decimal,
}

/// A named model portfolio used as an allocation reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub name: String,
    pub risk: String,
    pub horizon: String,
    /// Constituents in file order.
    pub constituents: Vec<BasketConstituent>,
}

impl Basket {
    /// Sum of constituent weights. Not required to be 100.
    ///
    /// `None` when the sum is out of range.
    pub fn weight_total(&self) -> Option<Decimal> {
        checked_sum(self.constituents.iter().map(|c| c.weight_percent))
    }
}
