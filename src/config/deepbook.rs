//! DeepBook pool configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::chain::DEFAULT_GAS_BUDGET;
use crate::domain::ObjectId;

/// Type tag of the SUI coin.
pub const SUI_TYPE: &str = "0x2::sui::SUI";

/// Whether `type_tag` names the SUI coin.
///
/// The address part may be written short (`0x2`) or zero-padded to 64 hex
/// digits; both name the same package.
#[must_use]
pub fn is_sui_type(type_tag: &str) -> bool {
    let Some((address, rest)) = type_tag.trim().split_once("::") else {
        return false;
    };
    let Some(hex) = address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) else {
        return false;
    };
    hex.trim_start_matches('0') == "2" && rest == "sui::SUI"
}

/// Quote coin module published with the test package.
pub const DEFAULT_QUOTE_MODULE: &str = "realusdc::REALUSDC";

/// Upper bound of the price range queried for level-2 snapshots.
pub const LEVEL2_PRICE_HIGH: u64 = 1_000_000_000_000;

/// DeepBook section of the config file. Ids left out are taken from the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepbookConfig {
    #[serde(default)]
    pub package_id: Option<ObjectId>,
    #[serde(default)]
    pub pool_object_id: Option<ObjectId>,
    #[serde(default)]
    pub account_cap: Option<ObjectId>,
    #[serde(default = "default_base_asset")]
    pub base_asset: String,
    /// Defaults to `{package_id}::realusdc::REALUSDC`.
    #[serde(default)]
    pub quote_asset: Option<String>,
    #[serde(default = "default_gas_budget")]
    pub gas_budget: u64,
    /// Lifetime of placed orders in seconds.
    #[serde(default = "default_order_ttl_secs")]
    pub order_ttl_secs: u64,
    #[serde(default)]
    pub level2_price_low: u64,
    #[serde(default = "default_level2_price_high")]
    pub level2_price_high: u64,
}

fn default_base_asset() -> String {
    SUI_TYPE.into()
}

const fn default_gas_budget() -> u64 {
    DEFAULT_GAS_BUDGET
}

const fn default_order_ttl_secs() -> u64 {
    24 * 60 * 60
}

const fn default_level2_price_high() -> u64 {
    LEVEL2_PRICE_HIGH
}

impl Default for DeepbookConfig {
    fn default() -> Self {
        Self {
            package_id: None,
            pool_object_id: None,
            account_cap: None,
            base_asset: default_base_asset(),
            quote_asset: None,
            gas_budget: default_gas_budget(),
            order_ttl_secs: default_order_ttl_secs(),
            level2_price_low: 0,
            level2_price_high: default_level2_price_high(),
        }
    }
}

/// Fully resolved settings a connector is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepbookSettings {
    pub package_id: ObjectId,
    pub pool_object_id: ObjectId,
    pub account_cap: Option<ObjectId>,
    pub base_asset: String,
    pub quote_asset: String,
    pub gas_budget: u64,
    pub order_ttl: Duration,
    pub level2_price_range: (u64, u64),
}

impl DeepbookSettings {
    /// Settings with defaults for everything but the two required ids.
    #[must_use]
    pub fn new(package_id: ObjectId, pool_object_id: ObjectId) -> Self {
        let quote_asset = format!("{package_id}::{DEFAULT_QUOTE_MODULE}");
        Self {
            package_id,
            pool_object_id,
            account_cap: None,
            base_asset: default_base_asset(),
            quote_asset,
            gas_budget: default_gas_budget(),
            order_ttl: Duration::from_secs(default_order_ttl_secs()),
            level2_price_range: (0, LEVEL2_PRICE_HIGH),
        }
    }

    #[must_use]
    pub fn with_account_cap(mut self, account_cap: ObjectId) -> Self {
        self.account_cap = Some(account_cap);
        self
    }

    /// `[base, quote]` type arguments of every pool function.
    #[must_use]
    pub fn type_arguments(&self) -> [&str; 2] {
        [&self.base_asset, &self.quote_asset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sui_type_accepts_long_form_address() {
        assert!(is_sui_type(SUI_TYPE));
        assert!(is_sui_type(&format!("0x{:0>64}::sui::SUI", "2")));
        assert!(!is_sui_type("0x20::sui::SUI"));
        assert!(!is_sui_type("0xPKG::realusdc::REALUSDC"));
        assert!(!is_sui_type("sui::SUI"));
    }

    #[test]
    fn quote_asset_defaults_to_package_coin() {
        let settings = DeepbookSettings::new(ObjectId::new("0xPKG"), ObjectId::new("0xPOOL"));
        assert_eq!(
            settings.type_arguments(),
            ["0x2::sui::SUI", "0xPKG::realusdc::REALUSDC"]
        );
        assert_eq!(settings.order_ttl, Duration::from_secs(86_400));
        assert_eq!(settings.level2_price_range, (0, 1_000_000_000_000));
    }
}
