use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context};

/// Which market data provider backs the price lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceProviderKind {
    Yahoo,
    /// No outbound calls; valuations use each holding's manual CMP.
    Manual,
}

impl FromStr for PriceProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(PriceProviderKind::Yahoo),
            "manual" => Ok(PriceProviderKind::Manual),
            other => bail!("Unknown price provider '{}' (expected yahoo or manual)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub baskets_file: PathBuf,
    pub rules_file: PathBuf,
    pub notes_file: PathBuf,
    pub price_provider: PriceProviderKind,
    pub price_cache_ttl: Duration,
    pub price_timeout: Duration,
    pub symbol_suffix: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads `SD_*` variables, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = get("SD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid SD_LISTEN_ADDR")?;
        let data_dir = PathBuf::from(get("SD_DATA_DIR").unwrap_or_else(|| "./data".into()));
        let data_file = |key: &str, default_name: &str| {
            get(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(default_name))
        };
        let baskets_file = data_file("SD_BASKETS_FILE", "baskets.json");
        let rules_file = data_file("SD_RULES_FILE", "rules.json");
        let notes_file = data_file("SD_NOTES_FILE", "notes.json");

        let price_provider = get("SD_PRICE_PROVIDER")
            .unwrap_or_else(|| "yahoo".into())
            .parse::<PriceProviderKind>()
            .context("Invalid SD_PRICE_PROVIDER")?;
        let ttl_secs: u64 = parse_number(&get, "SD_PRICE_CACHE_TTL_SECS", 30)?;
        let price_timeout_ms: u64 = parse_number(&get, "SD_PRICE_TIMEOUT_MS", 10_000)?;
        let request_timeout_ms: u64 = parse_number(&get, "SD_REQUEST_TIMEOUT_MS", 30_000)?;
        if price_timeout_ms == 0 || request_timeout_ms == 0 {
            bail!("SD_PRICE_TIMEOUT_MS and SD_REQUEST_TIMEOUT_MS must be greater than zero");
        }

        let symbol_suffix = get("SD_SYMBOL_SUFFIX").map(|s| s.trim().to_string());
        let cors_allow = get("SD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            data_dir,
            baskets_file,
            rules_file,
            notes_file,
            price_provider,
            price_cache_ttl: Duration::from_secs(ttl_secs),
            price_timeout: Duration::from_millis(price_timeout_ms),
            symbol_suffix,
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }
}

fn parse_number<G>(get: &G, key: &str, default: u64) -> anyhow::Result<u64>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
