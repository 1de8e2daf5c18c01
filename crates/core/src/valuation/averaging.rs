//! Average price calculator for a series of purchase lots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// One purchase: a quantity bought at a price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLot {
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: Decimal,
    pub price: Decimal,
}

impl PurchaseLot {
    pub fn new(quantity: Decimal, price: Decimal) -> Self {
        Self { quantity, price }
    }
}

/// Quantity-weighted average price, `Σ(qty * price) / Σqty`.
///
/// An empty list has no average and yields `None`.
pub fn average_price(lots: &[PurchaseLot]) -> Result<Option<Decimal>> {
    for (idx, lot) in lots.iter().enumerate() {
        if lot.quantity <= Decimal::ZERO {
            return Err(ValidationError::invalid(
                format!("lots[{}].qty", idx),
                "must be greater than zero",
            )
            .into());
        }
        if lot.price < Decimal::ZERO {
            return Err(
                ValidationError::invalid(format!("lots[{}].price", idx), "must not be negative")
                    .into(),
            );
        }
    }
    if lots.is_empty() {
        return Ok(None);
    }

    let mut total_quantity = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    for lot in lots {
        let cost = lot.quantity.checked_mul(lot.price).ok_or_else(|| {
            ValidationError::invalid("lots", "total cost is out of range")
        })?;
        total_cost = total_cost
            .checked_add(cost)
            .ok_or_else(|| ValidationError::invalid("lots", "total cost is out of range"))?;
        total_quantity = total_quantity
            .checked_add(lot.quantity)
            .ok_or_else(|| ValidationError::invalid("lots", "total quantity is out of range"))?;
    }
    Ok(total_cost.checked_div(total_quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn test_two_lot_average() {
        let lots = [
            PurchaseLot::new(dec!(10), dec!(100)),
            PurchaseLot::new(dec!(30), dec!(80)),
        ];
        assert_eq!(average_price(&lots).unwrap(), Some(dec!(85)));
    }

    #[test]
    fn test_single_lot_and_empty_list() {
        let lots = [PurchaseLot::new(dec!(7), dec!(12.5))];
        assert_eq!(average_price(&lots).unwrap(), Some(dec!(12.5)));
        assert_eq!(average_price(&[]).unwrap(), None);
    }

    #[test]
    fn test_invalid_lots_are_rejected() {
        let lots = [
            PurchaseLot::new(dec!(1), dec!(10)),
            PurchaseLot::new(dec!(0), dec!(10)),
        ];
        match average_price(&lots) {
            Err(Error::InvalidHolding(v)) => assert_eq!(v.field(), Some("lots[1].qty")),
            other => panic!("unexpected result: {other:?}"),
        }

        let lots = [PurchaseLot::new(dec!(1), dec!(-10))];
        assert!(average_price(&lots).is_err());
    }

    #[test]
    fn test_lot_accepts_qty_or_quantity() {
        let lot: PurchaseLot = serde_json::from_str(r#"{"qty": 3, "price": 9.5}"#).unwrap();
        assert_eq!(lot, PurchaseLot::new(dec!(3), dec!(9.5)));
        let lot: PurchaseLot = serde_json::from_str(r#"{"quantity": 3, "price": 9.5}"#).unwrap();
        assert_eq!(lot.quantity, dec!(3));
    }
}
