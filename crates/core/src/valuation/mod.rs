//! Valuation module - per-holding P&L and portfolio aggregates.

mod averaging;
mod valuation_model;
mod valuation_service;

pub use averaging::{average_price, PurchaseLot};
pub use valuation_model::{
    AggregationMode, PortfolioAggregate, PortfolioSummary, PriceSource, ValuedHolding,
};
pub use valuation_service::{
    aggregate, checked_sum, compute_metrics, pnl_percent, summarize, value_holding,
};
