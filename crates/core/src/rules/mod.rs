//! Rules module - thresholds, action classification and the rulebook.

mod rules_classifier;
mod rules_model;

pub use rules_classifier::{classify, daily_review};
pub use rules_model::{
    title_from_key, ActionLabel, ReviewRow, RuleSet, RulebookEntry, AVOID_AVERAGING_KEY,
    PROFIT_BOOKING_KEY, REVIEW_LOSS_KEY,
};
