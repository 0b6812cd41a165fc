use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::currency::CurrencyCode;

const DEFAULT_BACKEND_URL: &str = "https://coinverter-backend-ni0v.onrender.com";
const DEFAULT_MARKET_DATA_URL: &str = "https://api.coingecko.com/api/v3";

/// Internal service exposing the rate, history and conversion endpoints.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendServiceConfig {
    pub base_url: String,
}

/// External crypto market-data service (CoinGecko API shape).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MarketDataConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServicesConfig {
    pub backend: Option<BackendServiceConfig>,
    pub market_data: Option<MarketDataConfig>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        ServicesConfig {
            backend: Some(BackendServiceConfig {
                base_url: DEFAULT_BACKEND_URL.to_string(),
            }),
            market_data: Some(MarketDataConfig {
                base_url: DEFAULT_MARKET_DATA_URL.to_string(),
            }),
        }
    }
}

fn default_reference_currency() -> CurrencyCode {
    CurrencyCode::Brl
}

fn default_history_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    /// Every rate is quoted against this currency. Fixed per deployment.
    #[serde(default = "default_reference_currency")]
    pub reference_currency: CurrencyCode,
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            services: ServicesConfig::default(),
            reference_currency: default_reference_currency(),
            history_days: default_history_days(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "cambio", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn backend_base_url(&self) -> &str {
        self.services
            .backend
            .as_ref()
            .map_or(DEFAULT_BACKEND_URL, |s| &s.base_url)
    }

    pub fn market_data_base_url(&self) -> &str {
        self.services
            .market_data
            .as_ref()
            .map_or(DEFAULT_MARKET_DATA_URL, |s| &s.base_url)
    }
}
