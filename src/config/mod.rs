//! Configuration loading and validation.
//!
//! Configuration comes from an optional TOML file. Values the file leaves
//! out are read from per-network environment keys:
//!
//! | key | meaning |
//! |---|---|
//! | `SUIDEX_NETWORK` | network, default `localnet` |
//! | `{NETWORK}_PACKAGE_ID` | DeepBook package id |
//! | `{NETWORK}_POOL_OBJECT_ID` | pool object id |
//! | `{NETWORK}_ACCOUNT_CAP` | account capability id (optional) |
//! | `{NETWORK}_ADDRESS` | active wallet address (optional) |
//!
//! Nothing is read on import; the host builds a [`Config`] once and passes
//! the derived [`DeepbookSettings`] to the connector.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::ObjectId;
use crate::error::{ConfigError, Result};

mod deepbook;
mod logging;
mod network;

pub use deepbook::{
    is_sui_type, DeepbookConfig, DeepbookSettings, DEFAULT_QUOTE_MODULE, LEVEL2_PRICE_HIGH, SUI_TYPE,
};
pub use logging::LoggingConfig;
pub use network::{Network, NETWORK_ENV};

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    /// Defaults to the network's public endpoint.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Wallet identity. Keys never live in the config; signing is external.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub address: Option<String>,
}

/// Main configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Falls back to `SUIDEX_NETWORK`, then `localnet`.
    #[serde(default)]
    pub network: Option<Network>,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub deepbook: DeepbookConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load a TOML file and complete it from the process environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.with_env(process_env)
    }

    /// Build a configuration from the process environment alone.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env(process_env)
    }

    /// Fill values the file left out from `lookup`, then validate.
    ///
    /// `lookup` maps an environment key to its value.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = match self.network {
            Some(network) => network,
            None => match lookup(NETWORK_ENV) {
                Some(name) => name.parse()?,
                None => Network::default(),
            },
        };
        self.network = Some(network);

        let fill = |slot: &mut Option<ObjectId>, suffix: &str| {
            if slot.is_none() {
                *slot = lookup(&network.env_key(suffix)).map(ObjectId::new);
            }
        };
        fill(&mut self.deepbook.package_id, "PACKAGE_ID");
        fill(&mut self.deepbook.pool_object_id, "POOL_OBJECT_ID");
        fill(&mut self.deepbook.account_cap, "ACCOUNT_CAP");

        if self.wallet.address.is_none() {
            self.wallet.address = lookup(&network.env_key("ADDRESS"));
        }

        self.validate()?;
        debug!(network = %network, "Configuration resolved");
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let network = self.network();
        if self.deepbook.package_id.is_none() {
            return Err(ConfigError::MissingEnv {
                key: network.env_key("PACKAGE_ID"),
            }
            .into());
        }
        if self.deepbook.pool_object_id.is_none() {
            return Err(ConfigError::MissingEnv {
                key: network.env_key("POOL_OBJECT_ID"),
            }
            .into());
        }
        if self.deepbook.gas_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gas_budget",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.deepbook.level2_price_low > self.deepbook.level2_price_high {
            return Err(ConfigError::InvalidValue {
                field: "level2_price_low",
                reason: format!(
                    "{} exceeds level2_price_high {}",
                    self.deepbook.level2_price_low, self.deepbook.level2_price_high
                ),
            }
            .into());
        }
        if let Some(url) = &self.rpc.url {
            url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: "rpc.url",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The resolved network.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network.unwrap_or_default()
    }

    #[must_use]
    pub fn rpc_url(&self) -> String {
        self.rpc
            .url
            .clone()
            .unwrap_or_else(|| self.network().default_rpc_url())
    }

    #[must_use]
    pub const fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc.timeout_ms)
    }

    /// Settings for a connector.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingEnv`] if the package or pool id is unset.
    pub fn deepbook_settings(&self) -> Result<DeepbookSettings> {
        let network = self.network();
        let package_id = self
            .deepbook
            .package_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnv {
                key: network.env_key("PACKAGE_ID"),
            })?;
        let pool_object_id = self
            .deepbook
            .pool_object_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnv {
                key: network.env_key("POOL_OBJECT_ID"),
            })?;

        let mut settings = DeepbookSettings::new(package_id, pool_object_id);
        settings.account_cap = self.deepbook.account_cap.clone();
        settings.base_asset = self.deepbook.base_asset.clone();
        if let Some(quote) = &self.deepbook.quote_asset {
            settings.quote_asset = quote.clone();
        }
        settings.gas_budget = self.deepbook.gas_budget;
        settings.order_ttl = Duration::from_secs(self.deepbook.order_ttl_secs);
        settings.level2_price_range = (self.deepbook.level2_price_low, self.deepbook.level2_price_high);
        Ok(settings)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
