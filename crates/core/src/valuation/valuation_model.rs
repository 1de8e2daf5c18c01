//! Valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;

/// Where the price used for a valuation came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PriceSource {
    /// Fetched from the price lookup for this request.
    Live,
    /// The holding's manually entered CMP, used when no live price exists.
    Manual,
}

/// A holding with its derived metrics. Recomputed per request, never stored.
///
/// Every derived field is `None` when no price is known. `pnl_percent` is
/// also `None` when the average cost is zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuedHolding {
    #[serde(flatten)]
    pub holding: Holding,
    pub price: Option<Decimal>,
    pub price_source: Option<PriceSource>,
    pub cost_basis: Decimal,
    pub value: Option<Decimal>,
    pub pnl_amount: Option<Decimal>,
    pub pnl_percent: Option<Decimal>,
}

impl ValuedHolding {
    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }
}

/// How per-holding results roll up into an overall P&L percentage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AggregationMode {
    /// `(total value - total cost) / total cost`. Unpriced holdings count
    /// their cost with a value of zero.
    #[default]
    CapitalWeighted,
    /// Plain mean of the defined per-holding percentages.
    SimpleMean,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAggregate {
    /// `None` when the total is out of range.
    pub total_value: Option<Decimal>,
    pub overall_pnl_percent: Option<Decimal>,
    pub mode: AggregationMode,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Option<Decimal>,
    pub total_cost_basis: Option<Decimal>,
    /// Capital-weighted overall P&L.
    pub overall_pnl_percent: Option<Decimal>,
    /// Mean of per-holding P&L, as the original dashboard showed it.
    pub mean_pnl_percent: Option<Decimal>,
    pub holdings_count: usize,
    pub unpriced_count: usize,
}
