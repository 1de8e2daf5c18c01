use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market quote for a symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Provider symbol the quote was fetched for
    pub symbol: String,

    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Closing/current price (required)
    pub close: Decimal,

    /// Quote currency, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a new quote with minimal required fields
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        close: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            close,
            currency: None,
            source: source.into(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new("TCS.NS", Utc::now(), dec!(3850.25), "YAHOO");
        assert_eq!(quote.close, dec!(3850.25));
        assert_eq!(quote.symbol, "TCS.NS");
        assert!(quote.currency.is_none());
    }

    #[test]
    fn test_quote_with_currency() {
        let quote = Quote::new("TCS.NS", Utc::now(), dec!(3850.25), "YAHOO").with_currency("INR");
        assert_eq!(quote.currency.as_deref(), Some("INR"));
    }
}
