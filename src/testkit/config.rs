//! Canonical test configurations.
//!
//! Single source of truth for the ids and settings used across tests.

use std::collections::HashMap;

use crate::config::DeepbookSettings;
use crate::domain::ObjectId;

pub const PACKAGE_ID: &str = "0xPKG";
pub const POOL_OBJECT_ID: &str = "0xPOOL";
pub const ACCOUNT_CAP: &str = "0xCAP";
pub const ADDRESS: &str = "0xA11CE";

/// Settings for the canonical pool, with no account capability known.
pub fn settings() -> DeepbookSettings {
    DeepbookSettings::new(ObjectId::new(PACKAGE_ID), ObjectId::new(POOL_OBJECT_ID))
}

/// Settings for the canonical pool with [`ACCOUNT_CAP`] already known.
pub fn settings_with_cap() -> DeepbookSettings {
    settings().with_account_cap(ObjectId::new(ACCOUNT_CAP))
}

/// Environment lookup backed by a fixed set of pairs, for
/// [`Config::with_env`](crate::config::Config::with_env).
pub fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
