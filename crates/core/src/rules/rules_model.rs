//! Rules domain models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const PROFIT_BOOKING_KEY: &str = "profit_booking_percent";
pub const AVOID_AVERAGING_KEY: &str = "avoid_averaging_loss_percent";
pub const REVIEW_LOSS_KEY: &str = "review_loss_percent";

/// Recommended action for a holding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActionLabel {
    Hold,
    ProfitBooking,
    AvoidAveraging,
    Review,
}

impl ActionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::Hold => "Hold",
            ActionLabel::ProfitBooking => "Profit Booking",
            ActionLabel::AvoidAveraging => "Avoid Averaging",
            ActionLabel::Review => "Review",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the rulebook as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RulebookEntry {
    pub key: String,
    pub title: String,
    pub value: serde_json::Value,
}

impl RulebookEntry {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();
        Self {
            title: title_from_key(&key),
            key,
            value,
        }
    }
}

/// Signed P&L thresholds, in percent, plus the rulebook they came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub profit_booking_percent: Decimal,
    pub avoid_averaging_percent: Decimal,
    pub review_loss_percent: Decimal,
    rulebook: Vec<RulebookEntry>,
}

impl RuleSet {
    pub fn new(
        profit_booking_percent: Decimal,
        avoid_averaging_percent: Decimal,
        review_loss_percent: Decimal,
    ) -> Self {
        Self {
            profit_booking_percent,
            avoid_averaging_percent,
            review_loss_percent,
            rulebook: Vec::new(),
        }
    }

    pub fn with_rulebook(mut self, rulebook: Vec<RulebookEntry>) -> Self {
        self.rulebook = rulebook;
        self
    }

    /// Every entry of the rules file, in file order.
    pub fn rulebook(&self) -> &[RulebookEntry] {
        &self.rulebook
    }
}

/// One row of the daily review table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    pub symbol: String,
    pub pnl_percent: Option<Decimal>,
    pub action: ActionLabel,
}

/// `avoid_averaging_loss_percent` -> `Avoid Averaging Loss Percent`.
pub fn title_from_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
