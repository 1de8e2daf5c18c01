//! Holdings domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

pub const MAX_SYMBOL_LEN: usize = 32;

/// Punctuation allowed in a symbol besides ASCII letters and digits.
const SYMBOL_PUNCTUATION: [char; 7] = ['.', '-', '_', '&', '^', '=', ':'];

/// A validated position: one row of the holdings table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// Manually entered current market price (CMP).
    pub current_price: Option<Decimal>,
}

impl Holding {
    pub fn new(
        symbol: &str,
        quantity: Decimal,
        average_cost: Decimal,
        current_price: Option<Decimal>,
    ) -> Result<Self> {
        NewHolding {
            symbol: symbol.to_string(),
            quantity,
            average_cost,
            current_price,
        }
        .try_into()
    }

    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.average_cost
    }
}

/// Input model for adding or replacing a holding.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub symbol: String,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        normalize_symbol(&self.symbol)?;

        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::invalid("quantity", "must be greater than zero").into());
        }
        if self.average_cost < Decimal::ZERO {
            return Err(ValidationError::invalid("averageCost", "must not be negative").into());
        }
        if let Some(price) = self.current_price {
            if price < Decimal::ZERO {
                return Err(
                    ValidationError::invalid("currentPrice", "must not be negative").into(),
                );
            }
        }
        if self.quantity.checked_mul(self.average_cost).is_none() {
            return Err(ValidationError::invalid("quantity", "cost basis is out of range").into());
        }
        Ok(())
    }
}

impl TryFrom<NewHolding> for Holding {
    type Error = Error;

    fn try_from(input: NewHolding) -> Result<Self> {
        input.validate()?;
        Ok(Holding {
            symbol: normalize_symbol(&input.symbol)?,
            quantity: input.quantity,
            average_cost: input.average_cost,
            current_price: input.current_price,
        })
    }
}

/// Trims and upper-cases a symbol, rejecting anything that can't be one.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField("symbol".to_string()).into());
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(ValidationError::invalid(
            "symbol",
            format!("must be at most {} characters", MAX_SYMBOL_LEN),
        )
        .into());
    }
    if let Some(bad) = symbol
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !SYMBOL_PUNCTUATION.contains(c))
    {
        return Err(
            ValidationError::invalid("symbol", format!("contains invalid character '{}'", bad))
                .into(),
        );
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(err: Error) -> Option<String> {
        match err {
            Error::InvalidHolding(v) => v.field().map(str::to_string),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_symbol_is_normalized() {
        let holding = Holding::new("  reliance ", dec!(10), dec!(2500), None).unwrap();
        assert_eq!(holding.symbol, "RELIANCE");
        assert_eq!(normalize_symbol("m&m").unwrap(), "M&M");
        assert_eq!(normalize_symbol("nse:infy").unwrap(), "NSE:INFY");
    }

    #[test]
    fn test_invalid_symbols_are_rejected() {
        assert_eq!(field_of(normalize_symbol("   ").unwrap_err()).as_deref(), Some("symbol"));
        assert!(normalize_symbol("TATA MOTORS").is_err());
        assert!(normalize_symbol(&"A".repeat(MAX_SYMBOL_LEN + 1)).is_err());
        assert!(normalize_symbol(&"A".repeat(MAX_SYMBOL_LEN)).is_ok());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let err = Holding::new("TCS", dec!(0), dec!(100), None).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("quantity"));
    }

    #[test]
    fn test_negative_cost_and_price_are_rejected() {
        let err = Holding::new("TCS", dec!(1), dec!(-1), None).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("averageCost"));

        let err = Holding::new("TCS", dec!(1), dec!(10), Some(dec!(-5))).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("currentPrice"));
    }

    #[test]
    fn test_zero_average_cost_is_allowed() {
        let holding = Holding::new("BONUS", dec!(50), dec!(0), Some(dec!(12))).unwrap();
        assert_eq!(holding.cost_basis(), dec!(0));
    }

    #[test]
    fn test_new_holding_deserializes_camel_case() {
        let input: NewHolding =
            serde_json::from_str(r#"{"symbol":"infy","quantity":5,"averageCost":1450.5}"#)
                .unwrap();
        assert_eq!(input.current_price, None);
        let holding = Holding::try_from(input).unwrap();
        assert_eq!(holding.symbol, "INFY");
        assert_eq!(holding.average_cost, dec!(1450.5));
        assert_eq!(holding.cost_basis(), dec!(7252.5));
    }
}
