use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use stockdesk_market_data::{PriceLookup, PriceResult};

use super::valuation_model::{
    AggregationMode, PortfolioAggregate, PortfolioSummary, PriceSource, ValuedHolding,
};
use crate::holdings::Holding;

/// `(price - average_cost) / average_cost * 100`.
///
/// Returns `None` for a zero average cost or when the result overflows.
pub fn pnl_percent(price: Decimal, average_cost: Decimal) -> Option<Decimal> {
    if average_cost.is_zero() {
        return None;
    }
    (price - average_cost)
        .checked_div(average_cost)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Values one holding against a lookup result.
///
/// A live price wins; otherwise the manual CMP is used; otherwise the
/// holding is left unpriced.
pub fn value_holding(holding: &Holding, lookup: PriceResult) -> ValuedHolding {
    let (price, price_source) = match (lookup, holding.current_price) {
        (PriceResult::Available(price), _) => (Some(price), Some(PriceSource::Live)),
        (PriceResult::Unavailable, Some(cmp)) => (Some(cmp), Some(PriceSource::Manual)),
        (PriceResult::Unavailable, None) => {
            debug!("No price for {}; leaving it unpriced", holding.symbol);
            (None, None)
        }
    };

    let cost_basis = holding.cost_basis();
    let value = price.and_then(|p| holding.quantity.checked_mul(p));
    let pnl_amount = value.and_then(|v| v.checked_sub(cost_basis));
    let pnl_percent = price.and_then(|p| pnl_percent(p, holding.average_cost));

    ValuedHolding {
        holding: holding.clone(),
        price,
        price_source,
        cost_basis,
        value,
        pnl_amount,
        pnl_percent,
    }
}

/// Computes metrics for every holding, in holdings order.
///
/// Prices are looked up concurrently; all lookups finish before any holding
/// is valued.
pub async fn compute_metrics(holdings: &[Holding], prices: &dyn PriceLookup) -> Vec<ValuedHolding> {
    let lookups = join_all(holdings.iter().map(|h| prices.lookup(&h.symbol))).await;

    let valued: Vec<ValuedHolding> = holdings
        .iter()
        .zip(lookups)
        .map(|(holding, lookup)| value_holding(holding, lookup))
        .collect();

    let unpriced = valued.iter().filter(|v| !v.is_priced()).count();
    if unpriced > 0 {
        warn!("{} of {} holdings have no price", unpriced, valued.len());
    }
    valued
}

/// Sums decimals, returning `None` if the total leaves `Decimal`'s range.
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}

fn total_value(valued: &[ValuedHolding]) -> Option<Decimal> {
    checked_sum(valued.iter().filter_map(|v| v.value))
}

fn total_cost_basis(valued: &[ValuedHolding]) -> Option<Decimal> {
    checked_sum(valued.iter().map(|v| v.cost_basis))
}

fn capital_weighted_pnl(valued: &[ValuedHolding]) -> Option<Decimal> {
    pnl_percent(total_value(valued)?, total_cost_basis(valued)?)
}

fn mean_pnl(valued: &[ValuedHolding]) -> Option<Decimal> {
    let defined: Vec<Decimal> = valued.iter().filter_map(|v| v.pnl_percent).collect();
    if defined.is_empty() {
        return None;
    }
    checked_sum(defined.iter().copied())?.checked_div(Decimal::from(defined.len()))
}

fn warn_on_overflow(valued: &[ValuedHolding], total: Option<Decimal>) {
    if total.is_none() && !valued.is_empty() {
        warn!(
            "Portfolio totals for {} holdings are out of range; reporting them as undefined",
            valued.len()
        );
    }
}

/// Rolls valued holdings up into a single overall figure.
pub fn aggregate(valued: &[ValuedHolding], mode: AggregationMode) -> PortfolioAggregate {
    let overall_pnl_percent = match mode {
        AggregationMode::CapitalWeighted => capital_weighted_pnl(valued),
        AggregationMode::SimpleMean => mean_pnl(valued),
    };
    let total_value = total_value(valued);
    warn_on_overflow(valued, total_value);
    PortfolioAggregate {
        total_value,
        overall_pnl_percent,
        mode,
    }
}

/// Totals that overflow are reported as `None` rather than failing.
pub fn summarize(valued: &[ValuedHolding]) -> PortfolioSummary {
    let total_cost_basis = total_cost_basis(valued);
    warn_on_overflow(valued, total_cost_basis);
    PortfolioSummary {
        total_value: total_value(valued),
        total_cost_basis,
        overall_pnl_percent: capital_weighted_pnl(valued),
        mean_pnl_percent: mean_pnl(valued),
        holdings_count: valued.len(),
        unpriced_count: valued.iter().filter(|v| !v.is_priced()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // --- Mock PriceLookup ---
    #[derive(Default)]
    struct MockPriceLookup {
        prices: HashMap<String, Decimal>,
        requested: Mutex<Vec<String>>,
    }

    impl MockPriceLookup {
        fn with(prices: &[(&str, Decimal)]) -> Self {
            Self {
                prices: prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PriceLookup for MockPriceLookup {
        async fn lookup(&self, symbol: &str) -> PriceResult {
            self.requested.lock().unwrap().push(symbol.to_string());
            self.prices
                .get(symbol)
                .map(|p| PriceResult::from_price(*p))
                .unwrap_or(PriceResult::Unavailable)
        }
    }

    fn holding(symbol: &str, qty: Decimal, avg: Decimal, cmp: Option<Decimal>) -> Holding {
        Holding::new(symbol, qty, avg, cmp).unwrap()
    }

    #[test]
    fn test_pnl_percent() {
        assert_eq!(pnl_percent(dec!(120), dec!(100)), Some(dec!(20)));
        assert_eq!(pnl_percent(dec!(85), dec!(100)), Some(dec!(-15)));
        assert_eq!(pnl_percent(dec!(50), dec!(0)), None);
    }

    #[test]
    fn test_live_price_wins_over_manual_cmp() {
        let valued = value_holding(
            &holding("TCS", dec!(10), dec!(100), Some(dec!(90))),
            PriceResult::Available(dec!(150)),
        );
        assert_eq!(valued.price, Some(dec!(150)));
        assert_eq!(valued.price_source, Some(PriceSource::Live));
        assert_eq!(valued.cost_basis, dec!(1000));
        assert_eq!(valued.value, Some(dec!(1500)));
        assert_eq!(valued.pnl_amount, Some(dec!(500)));
        assert_eq!(valued.pnl_percent, Some(dec!(50)));
    }

    #[test]
    fn test_manual_cmp_is_the_fallback() {
        let valued = value_holding(
            &holding("TCS", dec!(10), dec!(100), Some(dec!(90))),
            PriceResult::Unavailable,
        );
        assert_eq!(valued.price, Some(dec!(90)));
        assert_eq!(valued.price_source, Some(PriceSource::Manual));
        assert_eq!(valued.pnl_percent, Some(dec!(-10)));
    }

    #[test]
    fn test_unpriced_holding_keeps_its_row() {
        let valued = value_holding(&holding("GONE", dec!(4), dec!(25), None), PriceResult::Unavailable);
        assert!(!valued.is_priced());
        assert_eq!(valued.price_source, None);
        assert_eq!(valued.value, None);
        assert_eq!(valued.pnl_amount, None);
        assert_eq!(valued.pnl_percent, None);
        assert_eq!(valued.cost_basis, dec!(100));
    }

    #[test]
    fn test_zero_average_cost_has_no_percentage() {
        let valued = value_holding(
            &holding("BONUS", dec!(10), dec!(0), None),
            PriceResult::Available(dec!(30)),
        );
        assert_eq!(valued.value, Some(dec!(300)));
        assert_eq!(valued.pnl_amount, Some(dec!(300)));
        assert_eq!(valued.pnl_percent, None);
    }

    #[tokio::test]
    async fn test_compute_metrics_keeps_order_and_looks_up_every_symbol() {
        let lookup = MockPriceLookup::with(&[("A", dec!(110)), ("C", dec!(40))]);
        let holdings = vec![
            holding("C", dec!(1), dec!(50), None),
            holding("B", dec!(2), dec!(10), None),
            holding("A", dec!(3), dec!(100), None),
        ];

        let valued = compute_metrics(&holdings, &lookup).await;

        let symbols: Vec<&str> = valued.iter().map(|v| v.holding.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "B", "A"]);
        assert_eq!(valued[0].pnl_percent, Some(dec!(-20)));
        assert!(!valued[1].is_priced());
        assert_eq!(valued[2].pnl_percent, Some(dec!(10)));

        let mut requested = lookup.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_compute_metrics_on_empty_holdings() {
        let lookup = MockPriceLookup::default();
        assert!(compute_metrics(&[], &lookup).await.is_empty());
    }

    #[test]
    fn test_capital_weighted_aggregate_counts_unpriced_cost() {
        let valued = vec![
            value_holding(&holding("A", dec!(10), dec!(100), None), PriceResult::Available(dec!(120))),
            value_holding(&holding("B", dec!(10), dec!(100), None), PriceResult::Unavailable),
        ];

        let agg = aggregate(&valued, AggregationMode::CapitalWeighted);
        assert_eq!(agg.total_value, Some(dec!(1200)));
        // (1200 - 2000) / 2000
        assert_eq!(agg.overall_pnl_percent, Some(dec!(-40)));
    }

    #[test]
    fn test_simple_mean_excludes_undefined_values() {
        let valued = vec![
            value_holding(&holding("A", dec!(1), dec!(100), None), PriceResult::Available(dec!(130))),
            value_holding(&holding("B", dec!(1), dec!(100), None), PriceResult::Available(dec!(90))),
            value_holding(&holding("Z", dec!(1), dec!(0), None), PriceResult::Available(dec!(5))),
            value_holding(&holding("U", dec!(1), dec!(10), None), PriceResult::Unavailable),
        ];

        let agg = aggregate(&valued, AggregationMode::SimpleMean);
        assert_eq!(agg.overall_pnl_percent, Some(dec!(10)));
        assert_eq!(agg.mode, AggregationMode::SimpleMean);
    }

    #[test]
    fn test_aggregates_of_nothing_are_undefined() {
        assert_eq!(aggregate(&[], AggregationMode::CapitalWeighted).overall_pnl_percent, None);
        assert_eq!(aggregate(&[], AggregationMode::SimpleMean).overall_pnl_percent, None);

        let zero_cost = vec![value_holding(
            &holding("FREE", dec!(1), dec!(0), None),
            PriceResult::Available(dec!(10)),
        )];
        let agg = aggregate(&zero_cost, AggregationMode::CapitalWeighted);
        assert_eq!(agg.total_value, Some(dec!(10)));
        assert_eq!(agg.overall_pnl_percent, None);
    }

    #[test]
    fn test_summarize() {
        let valued = vec![
            value_holding(&holding("A", dec!(2), dec!(50), None), PriceResult::Available(dec!(60))),
            value_holding(&holding("B", dec!(1), dec!(100), Some(dec!(80))), PriceResult::Unavailable),
            value_holding(&holding("C", dec!(5), dec!(10), None), PriceResult::Unavailable),
        ];

        let summary = summarize(&valued);
        assert_eq!(summary.total_value, Some(dec!(200)));
        assert_eq!(summary.total_cost_basis, Some(dec!(250)));
        assert_eq!(summary.overall_pnl_percent, Some(dec!(-20)));
        assert_eq!(summary.mean_pnl_percent, Some(dec!(0)));
        assert_eq!(summary.holdings_count, 3);
        assert_eq!(summary.unpriced_count, 1);
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(1.5), dec!(2.5)]), Some(dec!(4)));
        assert_eq!(checked_sum(Vec::new()), Some(Decimal::ZERO));
        assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
    }

    #[test]
    fn test_totals_out_of_range_are_undefined() {
        let big = Decimal::from_i128_with_scale(4 * 10i128.pow(28), 0);
        let unpriced = vec![
            value_holding(&holding("A", big, dec!(1), None), PriceResult::Unavailable),
            value_holding(&holding("B", big, dec!(1), None), PriceResult::Unavailable),
        ];

        let summary = summarize(&unpriced);
        assert_eq!(summary.total_cost_basis, None);
        assert_eq!(summary.total_value, Some(Decimal::ZERO));
        assert_eq!(summary.overall_pnl_percent, None);
        assert_eq!(summary.holdings_count, 2);
        assert_eq!(summary.unpriced_count, 2);

        let priced = vec![
            value_holding(&holding("A", big, dec!(1), None), PriceResult::Available(dec!(1))),
            value_holding(&holding("B", big, dec!(1), None), PriceResult::Available(dec!(1))),
        ];
        let agg = aggregate(&priced, AggregationMode::CapitalWeighted);
        assert_eq!(agg.total_value, None);
        assert_eq!(agg.overall_pnl_percent, None);
        let mean = aggregate(&priced, AggregationMode::SimpleMean);
        assert_eq!(mean.overall_pnl_percent, Some(dec!(0)));
    }

    #[test]
    fn test_valued_holding_serializes_flat() {
        let valued = value_holding(&holding("TCS", dec!(1), dec!(0), None), PriceResult::Unavailable);
        let json = serde_json::to_value(&valued).unwrap();
        assert_eq!(json["symbol"], "TCS");
        assert!(json["pnlPercent"].is_null());
        assert!(json["priceSource"].is_null());
    }
}
