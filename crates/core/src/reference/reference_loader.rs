//! Loads `baskets.json` and `rules.json` once at startup.
//!
//! Any problem with either file is a configuration error; the caller is
//! expected to abort rather than run with partial reference data.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::baskets::{Basket, BasketConstituent};
use crate::errors::{ConfigError, Result};
use crate::holdings::normalize_symbol;
use crate::rules::{
    RuleSet, RulebookEntry, AVOID_AVERAGING_KEY, PROFIT_BOOKING_KEY, REVIEW_LOSS_KEY,
};

#[derive(Deserialize)]
struct RawBasket {
    name: String,
    #[serde(default)]
    risk: String,
    #[serde(default)]
    horizon: String,
    stocks: Map<String, Value>,
}

/// Read-only reference data shared by every request.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    baskets: Vec<Basket>,
    rules: RuleSet,
}

impl ReferenceData {
    pub fn new(baskets: Vec<Basket>, rules: RuleSet) -> Self {
        Self { baskets, rules }
    }

    pub fn load(baskets_path: &Path, rules_path: &Path) -> Result<Self> {
        let baskets = parse_baskets(&read_file(baskets_path)?, &baskets_path.display().to_string())?;
        let rules = parse_rules(&read_file(rules_path)?, &rules_path.display().to_string())?;
        info!(
            "Loaded {} baskets from {} and {} rules from {}",
            baskets.len(),
            baskets_path.display(),
            rules.rulebook().len(),
            rules_path.display()
        );
        Ok(Self::new(baskets, rules))
    }

    pub fn baskets(&self) -> &[Basket] {
        &self.baskets
    }

    /// Finds a basket by name, ignoring case.
    pub fn basket(&self, name: &str) -> Option<&Basket> {
        let name = name.trim();
        self.baskets.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

fn read_file(path: &Path) -> std::result::Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parses the baskets file: an array of `{name, risk, horizon, stocks}`.
///
/// Constituents keep the key order of `stocks`.
pub fn parse_baskets(json: &str, source: &str) -> std::result::Result<Vec<Basket>, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        path: source.to_string(),
        message,
    };

    let raw: Vec<RawBasket> = serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    let mut baskets: Vec<Basket> = Vec::with_capacity(raw.len());
    for entry in raw {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("Basket with an empty name".to_string()));
        }
        if baskets.iter().any(|b| b.name.eq_ignore_ascii_case(&name)) {
            return Err(invalid(format!("Duplicate basket name '{}'", name)));
        }

        let mut constituents: Vec<BasketConstituent> = Vec::with_capacity(entry.stocks.len());
        for (raw_symbol, raw_weight) in &entry.stocks {
            let symbol = normalize_symbol(raw_symbol)
                .map_err(|e| invalid(format!("Basket '{}': {}", name, e)))?;
            if constituents.iter().any(|c| c.symbol == symbol) {
                return Err(invalid(format!(
                    "Basket '{}' lists {} more than once",
                    name, symbol
                )));
            }
            let weight_percent = decimal_from_value(raw_weight).ok_or_else(|| {
                invalid(format!(
                    "Basket '{}': weight for {} is not a number",
                    name, symbol
                ))
            })?;
            if weight_percent < Decimal::ZERO {
                return Err(invalid(format!(
                    "Basket '{}': weight for {} is negative",
                    name, symbol
                )));
            }
            constituents.push(BasketConstituent {
                symbol,
                weight_percent,
            });
        }

        let basket = Basket {
            name,
            risk: entry.risk,
            horizon: entry.horizon,
            constituents,
        };
        if basket.weight_total().is_none() {
            return Err(invalid(format!(
                "Basket '{}': weights are out of range",
                basket.name
            )));
        }
        baskets.push(basket);
    }
    Ok(baskets)
}

/// Parses the rules file: an object with the three numeric thresholds plus
/// any number of free-text rulebook entries.
pub fn parse_rules(json: &str, source: &str) -> std::result::Result<RuleSet, ConfigError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
        path: source.to_string(),
        message: e.to_string(),
    })?;
    let Value::Object(entries) = value else {
        return Err(ConfigError::Malformed {
            path: source.to_string(),
            message: "expected a JSON object".to_string(),
        });
    };

    let threshold = |key: &str| -> std::result::Result<Decimal, ConfigError> {
        let raw = entries.get(key).ok_or_else(|| ConfigError::MissingKey {
            path: source.to_string(),
            key: key.to_string(),
        })?;
        decimal_from_value(raw).ok_or_else(|| ConfigError::InvalidValue {
            path: source.to_string(),
            message: format!("'{}' must be a number", key),
        })
    };

    let rules = RuleSet::new(
        threshold(PROFIT_BOOKING_KEY)?,
        threshold(AVOID_AVERAGING_KEY)?,
        threshold(REVIEW_LOSS_KEY)?,
    );
    let rulebook = entries
        .iter()
        .map(|(key, value)| RulebookEntry::new(key.as_str(), value.clone()))
        .collect();
    Ok(rules.with_rulebook(rulebook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    const BASKETS: &str = r#"[
        {"name": "Bluechip", "risk": "Low", "horizon": "5y+",
         "stocks": {"TCS": 40, "reliance": 35.5, "HDFCBANK": 24.5}},
        {"name": "Momentum", "risk": "High", "horizon": "1y",
         "stocks": {"ZOMATO": 50, "TRENT": 50}}
    ]"#;

    const RULES: &str = r#"{
        "profit_booking_percent": 20,
        "avoid_averaging_loss_percent": -15,
        "review_loss_percent": "-10",
        "max_stocks_per_basket": 10,
        "exit_rule": "Exit when the thesis breaks"
    }"#;

    #[test]
    fn test_parse_baskets_keeps_stock_order() {
        let baskets = parse_baskets(BASKETS, "baskets.json").unwrap();

        assert_eq!(baskets.len(), 2);
        let symbols: Vec<&str> = baskets[0]
            .constituents
            .iter()
            .map(|c| c.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["TCS", "RELIANCE", "HDFCBANK"]);
        assert_eq!(baskets[0].constituents[1].weight_percent, dec!(35.5));
        assert_eq!(baskets[0].weight_total(), Some(dec!(100)));
        assert_eq!(baskets[1].risk, "High");
    }

    #[test]
    fn test_duplicate_basket_name_is_rejected() {
        let json = r#"[{"name": "A", "stocks": {}}, {"name": "a", "stocks": {}}]"#;
        assert!(matches!(
            parse_baskets(json, "baskets.json"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let json = r#"[{"name": "A", "stocks": {"X": 110, "Y": -10}}]"#;
        let err = parse_baskets(json, "baskets.json").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_out_of_range_weight_total_is_rejected() {
        let json = r#"[{"name": "Huge", "stocks": {
            "X": "50000000000000000000000000000",
            "Y": "50000000000000000000000000000"}}]"#;
        let err = parse_baskets(json, "baskets.json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_malformed_baskets() {
        assert!(matches!(
            parse_baskets("{\"name\": 1}", "baskets.json"),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            parse_baskets(r#"[{"name": "A", "stocks": {"X": "lots"}}]"#, "baskets.json"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_rules() {
        let rules = parse_rules(RULES, "rules.json").unwrap();

        assert_eq!(rules.profit_booking_percent, dec!(20));
        assert_eq!(rules.avoid_averaging_percent, dec!(-15));
        assert_eq!(rules.review_loss_percent, dec!(-10));

        let keys: Vec<&str> = rules.rulebook().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "profit_booking_percent",
                "avoid_averaging_loss_percent",
                "review_loss_percent",
                "max_stocks_per_basket",
                "exit_rule"
            ]
        );
        assert_eq!(rules.rulebook()[4].title, "Exit Rule");
    }

    #[test]
    fn test_missing_rule_key() {
        let json = r#"{"profit_booking_percent": 20, "review_loss_percent": -10}"#;
        match parse_rules(json, "rules.json") {
            Err(ConfigError::MissingKey { key, .. }) => assert_eq!(key, AVOID_AVERAGING_KEY),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_threshold() {
        let json = r#"{"profit_booking_percent": "lots", "avoid_averaging_loss_percent": -15, "review_loss_percent": -10}"#;
        assert!(matches!(
            parse_rules(json, "rules.json"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_rules("[1, 2]", "rules.json"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let baskets_path = dir.path().join("baskets.json");
        let rules_path = dir.path().join("rules.json");
        fs::write(&baskets_path, BASKETS).unwrap();
        fs::write(&rules_path, RULES).unwrap();

        let data = ReferenceData::load(&baskets_path, &rules_path).unwrap();
        assert_eq!(data.baskets().len(), 2);
        assert_eq!(data.basket("bluechip").map(|b| b.name.as_str()), Some("Bluechip"));
        assert!(data.basket("Unknown").is_none());
        assert_eq!(data.rules().profit_booking_percent, dec!(20));
    }

    #[test]
    fn test_missing_file_is_a_configuration_error() {
        let dir = tempdir().unwrap();
        let rules_path = dir.path().join("rules.json");
        fs::write(&rules_path, RULES).unwrap();

        let err = ReferenceData::load(&dir.path().join("missing.json"), &rules_path).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigError::Unreadable { .. })
        ));
    }
}
