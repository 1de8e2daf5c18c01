use std::sync::{Arc, RwLock};

use anyhow::Context;
use stockdesk_core::{
    holdings::{Holding, HoldingsStore},
    notes::{FileNotesStore, NotesStore},
    reference::ReferenceData,
};
use stockdesk_market_data::{
    CachedPriceLookup, ManualProvider, MarketDataProvider, PriceLookup, PriceLookupConfig,
    SymbolResolver, YahooProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, PriceProviderKind};
use crate::error::{ApiError, ApiResult};

pub struct AppState {
    /// Session holdings. Never hold the guard across an `.await`.
    pub holdings: RwLock<HoldingsStore>,
    pub reference: Arc<ReferenceData>,
    pub notes: Arc<dyn NotesStore>,
    pub prices: Arc<dyn PriceLookup>,
}

impl AppState {
    /// Copies the current holdings out of the lock.
    pub fn holdings_snapshot(&self) -> ApiResult<Vec<Holding>> {
        let store = self
            .holdings
            .read()
            .map_err(|_| ApiError::Internal("Holdings lock poisoned".into()))?;
        Ok(store.list().to_vec())
    }

    /// Runs a mutation against the holdings store under the write lock.
    pub fn with_holdings_mut<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut HoldingsStore) -> stockdesk_core::Result<T>,
    {
        let mut store = self
            .holdings
            .write()
            .map_err(|_| ApiError::Internal("Holdings lock poisoned".into()))?;
        Ok(op(&mut store)?)
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("SD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_price_lookup(config: &Config) -> anyhow::Result<Arc<dyn PriceLookup>> {
    let provider: Arc<dyn MarketDataProvider> = match config.price_provider {
        PriceProviderKind::Yahoo => {
            Arc::new(YahooProvider::new().context("Failed to create the Yahoo provider")?)
        }
        PriceProviderKind::Manual => Arc::new(ManualProvider::new()),
    };
    if provider.is_live() {
        tracing::info!(
            "Using {} prices (cache {:?}, timeout {:?})",
            provider.id(),
            config.price_cache_ttl,
            config.price_timeout
        );
    } else {
        tracing::info!("Using manual prices only; no market data will be fetched");
    }

    let lookup = CachedPriceLookup::new(
        provider,
        SymbolResolver::new(config.symbol_suffix.as_deref()),
        PriceLookupConfig {
            cache_ttl: config.price_cache_ttl,
            timeout: config.price_timeout,
            ..PriceLookupConfig::default()
        },
    );
    Ok(Arc::new(lookup))
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let prices = build_price_lookup(config)?;
    build_state_with_prices(config, prices).await
}

/// Like [`build_state`], with a caller-supplied price lookup.
pub async fn build_state_with_prices(
    config: &Config,
    prices: Arc<dyn PriceLookup>,
) -> anyhow::Result<Arc<AppState>> {
    let reference = ReferenceData::load(&config.baskets_file, &config.rules_file)
        .context("Failed to load reference data")?;

    let notes: Arc<dyn NotesStore> = Arc::new(FileNotesStore::new(config.notes_file.clone()));
    let saved_notes = notes
        .list_notes()
        .with_context(|| format!("Failed to read notes from {}", config.notes_file.display()))?;
    tracing::info!(
        "Loaded {} baskets and {} notes",
        reference.baskets().len(),
        saved_notes.len()
    );

    Ok(Arc::new(AppState {
        holdings: RwLock::new(HoldingsStore::new()),
        reference: Arc::new(reference),
        notes,
        prices,
    }))
}
