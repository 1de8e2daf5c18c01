//! Symbol resolution.
//!
//! Users type bare tickers ("RELIANCE", "TCS"). Yahoo wants the exchange
//! suffix ("RELIANCE.NS"). The resolver appends the configured default suffix
//! to bare tickers and leaves anything that already names a market alone.

/// Characters that mark a symbol as already vendor-qualified:
/// exchange suffix (`.NS`), FX pair (`=X`), index (`^NSEI`), crypto pair (`BTC-USD`).
const QUALIFIER_CHARS: [char; 4] = ['.', '=', '^', '-'];

/// Translates user symbols into provider symbols.
#[derive(Clone, Debug, Default)]
pub struct SymbolResolver {
    default_suffix: Option<String>,
}

impl SymbolResolver {
    /// Create a resolver. An empty or whitespace suffix disables rewriting.
    pub fn new(default_suffix: Option<&str>) -> Self {
        let default_suffix = default_suffix
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.starts_with('.') {
                    s.to_uppercase()
                } else {
                    format!(".{}", s.to_uppercase())
                }
            });
        Self { default_suffix }
    }

    /// Returns the provider symbol for a user symbol.
    pub fn to_provider_symbol(&self, symbol: &str) -> String {
        let symbol = symbol.trim();
        match &self.default_suffix {
            Some(suffix) if !symbol.contains(&QUALIFIER_CHARS[..]) => {
                format!("{}{}", symbol, suffix)
            }
            _ => symbol.to_string(),
        }
    }

    pub fn default_suffix(&self) -> Option<&str> {
        self.default_suffix.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ticker_gets_suffix() {
        let resolver = SymbolResolver::new(Some(".NS"));
        assert_eq!(resolver.to_provider_symbol("RELIANCE"), "RELIANCE.NS");
    }

    #[test]
    fn test_suffix_without_dot_is_normalized() {
        let resolver = SymbolResolver::new(Some("bo"));
        assert_eq!(resolver.default_suffix(), Some(".BO"));
        assert_eq!(resolver.to_provider_symbol("TCS"), "TCS.BO");
    }

    #[test]
    fn test_qualified_symbols_pass_through() {
        let resolver = SymbolResolver::new(Some(".NS"));
        assert_eq!(resolver.to_provider_symbol("INFY.BO"), "INFY.BO");
        assert_eq!(resolver.to_provider_symbol("^NSEI"), "^NSEI");
        assert_eq!(resolver.to_provider_symbol("USDINR=X"), "USDINR=X");
        assert_eq!(resolver.to_provider_symbol("BTC-USD"), "BTC-USD");
    }

    #[test]
    fn test_no_suffix_configured() {
        let resolver = SymbolResolver::new(Some("  "));
        assert_eq!(resolver.default_suffix(), None);
        assert_eq!(resolver.to_provider_symbol("AAPL"), "AAPL");
        assert_eq!(SymbolResolver::default().to_provider_symbol("MSFT"), "MSFT");
    }
}
