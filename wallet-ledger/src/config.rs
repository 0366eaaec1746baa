//! Configuration for the wallet ledger service

use serde::{Deserialize, Serialize};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Listen address for the transport adapter
    pub listen_addr: String,

    /// Metrics listen address
    pub metrics_listen_addr: String,

    /// Currency assigned to wallets created without an explicit one
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "wallet-ledger".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            metrics_listen_addr: "0.0.0.0:9090".to_string(),
            default_currency: "USD".to_string(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(addr) = std::env::var("LEDGER_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(addr) = std::env::var("LEDGER_METRICS_ADDR") {
            config.metrics_listen_addr = addr;
        }

        if let Ok(currency) = std::env::var("LEDGER_DEFAULT_CURRENCY") {
            config.default_currency = currency;
        }

        Ok(config)
    }
}
