//! Baskets module - model portfolios and the rebalancing calculator.

mod baskets_model;
mod rebalancing_service;

pub use baskets_model::{Basket, BasketConstituent};
pub use rebalancing_service::{rebalance, RebalancePlan, RebalanceRow};
