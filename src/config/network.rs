//! Sui network selection and per-network endpoints.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the network when the config file does not.
pub const NETWORK_ENV: &str = "SUIDEX_NETWORK";

/// Sui network the connector talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Localnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub const ALL: [Self; 3] = [Self::Localnet, Self::Testnet, Self::Mainnet];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Localnet => "localnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }

    /// Prefix of the per-network environment keys, e.g. `TESTNET`.
    #[must_use]
    pub fn env_prefix(self) -> String {
        self.as_str().to_uppercase()
    }

    /// `{NETWORK}_{suffix}`, e.g. `TESTNET_PACKAGE_ID`.
    #[must_use]
    pub fn env_key(self, suffix: &str) -> String {
        format!("{}_{suffix}", self.env_prefix())
    }

    /// Default JSON-RPC port of a local node.
    #[must_use]
    pub const fn localnet_rpc_port() -> u16 {
        44340
    }

    #[must_use]
    pub fn default_rpc_url(self) -> String {
        match self {
            Self::Localnet => format!("http://0.0.0.0:{}", Self::localnet_rpc_port()),
            Self::Testnet => "https://rpc.testnet.sui.io:443".into(),
            Self::Mainnet => "https://fullnode.mainnet.sui.io:443".into(),
        }
    }

    #[must_use]
    pub fn graphql_url(self) -> String {
        format!("https://sui-{}.mystenlabs.com/graphql", self.as_str())
    }

    /// Name of the Sui CLI binary set up for this network.
    #[must_use]
    pub const fn cli_tool(self) -> &'static str {
        match self {
            Self::Localnet => "lsui",
            Self::Testnet => "tsui",
            Self::Mainnet => "sui",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "network",
                reason: format!("unknown network '{s}' (expected localnet, testnet or mainnet)"),
            })
    }
}
