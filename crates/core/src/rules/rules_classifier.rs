use rust_decimal::Decimal;

use super::rules_model::{ActionLabel, ReviewRow, RuleSet};
use crate::valuation::ValuedHolding;

/// Maps a P&L percentage to an action. First match wins:
///
/// 1. no percentage -> Hold
/// 2. at or above the profit-booking threshold -> ProfitBooking
/// 3. at or below the avoid-averaging threshold -> AvoidAveraging
/// 4. at or below the review threshold -> Review
/// 5. otherwise Hold
///
/// The order settles overlapping thresholds and is part of the contract.
pub fn classify(pnl_percent: Option<Decimal>, rules: &RuleSet) -> ActionLabel {
    let Some(pnl) = pnl_percent else {
        return ActionLabel::Hold;
    };
    if pnl >= rules.profit_booking_percent {
        ActionLabel::ProfitBooking
    } else if pnl <= rules.avoid_averaging_percent {
        ActionLabel::AvoidAveraging
    } else if pnl <= rules.review_loss_percent {
        ActionLabel::Review
    } else {
        ActionLabel::Hold
    }
}

/// One action per holding, in holdings order.
pub fn daily_review(valued: &[ValuedHolding], rules: &RuleSet) -> Vec<ReviewRow> {
    valued
        .iter()
        .map(|v| ReviewRow {
            symbol: v.holding.symbol.clone(),
            pnl_percent: v.pnl_percent,
            action: classify(v.pnl_percent, rules),
        })
        .collect()
}
