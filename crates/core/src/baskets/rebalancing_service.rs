use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockdesk_market_data::PriceLookup;

use super::baskets_model::Basket;
use crate::errors::{Error, Result};
use crate::valuation::checked_sum;

/// Target position for one basket constituent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRow {
    pub symbol: String,
    pub weight_percent: Decimal,
    pub price: Option<Decimal>,
    /// Capital earmarked for this constituent.
    pub allocation: Decimal,
    /// Whole shares the allocation buys; zero when unpriced.
    pub ideal_quantity: Decimal,
    pub invested_amount: Decimal,
    pub priced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    pub basket_name: String,
    pub total_capital: Decimal,
    pub weight_total: Decimal,
    pub rows: Vec<RebalanceRow>,
    pub invested_total: Decimal,
    pub uninvested_cash: Decimal,
}

/// Splits `total_capital` across a basket by weight and converts each share
/// of capital into whole shares at the latest price.
///
/// An unpriced constituent keeps its row with a zero quantity; the others are
/// unaffected.
pub async fn rebalance(
    basket: &Basket,
    total_capital: Decimal,
    prices: &dyn PriceLookup,
) -> Result<RebalancePlan> {
    if total_capital <= Decimal::ZERO {
        return Err(Error::InvalidInput(
            "Capital must be greater than zero".to_string(),
        ));
    }

    let weight_total = basket.weight_total().ok_or_else(|| {
        Error::InvalidInput(format!("Weights of basket '{}' are out of range", basket.name))
    })?;
    if weight_total != Decimal::ONE_HUNDRED {
        warn!(
            "Basket '{}' weights sum to {} rather than 100",
            basket.name, weight_total
        );
    }

    let lookups = join_all(
        basket
            .constituents
            .iter()
            .map(|c| prices.lookup(&c.symbol)),
    )
    .await;

    let mut rows = Vec::with_capacity(basket.constituents.len());
    for (constituent, lookup) in basket.constituents.iter().zip(lookups) {
        let allocation = total_capital
            .checked_mul(constituent.weight_percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(out_of_range)?;

        let price = lookup.price();
        let ideal_quantity = price
            .and_then(|p| allocation.checked_div(p))
            .map(|q| q.floor())
            .unwrap_or(Decimal::ZERO);
        let invested_amount = match price {
            Some(p) => ideal_quantity.checked_mul(p).ok_or_else(out_of_range)?,
            None => Decimal::ZERO,
        };

        if price.is_none() {
            debug!(
                "No price for {} in basket '{}'",
                constituent.symbol, basket.name
            );
        }

        rows.push(RebalanceRow {
            symbol: constituent.symbol.clone(),
            weight_percent: constituent.weight_percent,
            price,
            allocation,
            ideal_quantity,
            invested_amount,
            priced: price.is_some(),
        });
    }

    let invested_total =
        checked_sum(rows.iter().map(|r| r.invested_amount)).ok_or_else(out_of_range)?;
    let uninvested_cash = total_capital
        .checked_sub(invested_total)
        .ok_or_else(out_of_range)?;
    Ok(RebalancePlan {
        basket_name: basket.name.clone(),
        total_capital,
        weight_total,
        rows,
        invested_total,
        uninvested_cash,
    })
}

fn out_of_range() -> Error {
    Error::InvalidInput("Capital is out of range".to_string())
}
