//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to fetch the latest price for
//! equities and ETFs (e.g., AAPL, TCS.NS).

mod models;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

use models::YahooChartResponse;

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Convert a Yahoo library quote to our Quote model.
    fn yahoo_quote_to_quote(
        symbol: &str,
        yahoo_quote: yahoo::Quote,
    ) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote::new(symbol, timestamp, close, PROVIDER_ID))
    }

    /// Fetch latest quote using primary method (library API).
    async fn fetch_latest_quote_primary(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::NoData(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let yahoo_quote = response.last_quote().map_err(|e| {
            debug!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::NoData(symbol.to_string())
        })?;

        Self::yahoo_quote_to_quote(symbol, yahoo_quote)
    }

    /// Fetch latest quote using backup method (v8 chart API).
    async fn fetch_latest_quote_backup(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=1d&interval=1d",
            encode(symbol)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Chart request failed with status {}", response.status()),
            });
        }

        let data: YahooChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse chart response: {}", e),
                })?;

        quote_from_chart(symbol, data)
    }
}

/// Extract the latest price from a chart response.
fn quote_from_chart(symbol: &str, data: YahooChartResponse) -> Result<Quote, MarketDataError> {
    if let Some(error) = data.chart.error {
        let code = error.code.unwrap_or_default();
        if code.eq_ignore_ascii_case("Not Found") {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        return Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: error.description.unwrap_or(code),
        });
    }

    let meta = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| result.meta)
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let close = meta
        .regular_market_price
        .or(meta.chart_previous_close)
        .and_then(Decimal::from_f64_retain)
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let timestamp = meta
        .regular_market_time
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now);

    let quote = Quote::new(symbol, timestamp, close, PROVIDER_ID);
    Ok(match meta.currency {
        Some(currency) => quote.with_currency(currency),
        None => quote,
    })
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        match self.fetch_latest_quote_primary(symbol).await {
            Ok(quote) => Ok(quote),
            Err(primary_err) => {
                warn!(
                    "Primary Yahoo quote fetch failed for {}: {}. Trying chart API.",
                    symbol, primary_err
                );
                self.fetch_latest_quote_backup(symbol).await
            }
        }
    }
}
