//! Handler for the `config` command.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::domain::{from_base_units, TradingPair, SUI_DECIMALS};
use crate::error::Result;

/// Load configuration from `path`, or from the environment when absent.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
}

/// Execute `config`.
pub fn execute(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;
    let settings = config.deepbook_settings()?;
    let network = config.network();

    output::section("Network");
    output::key_value("Network", network);
    output::key_value("RPC", config.rpc_url());
    output::key_value("Timeout", format!("{}ms", config.rpc.timeout_ms));
    output::key_value("CLI tool", network.cli_tool());
    output::optional("Address", config.wallet.address.as_deref());

    output::section("DeepBook");
    output::key_value("Package", &settings.package_id);
    output::key_value("Pool", &settings.pool_object_id);
    output::optional("Account cap", settings.account_cap.as_ref());
    output::key_value(
        "Pair",
        TradingPair::from_type_tags(&settings.base_asset, &settings.quote_asset),
    );
    output::key_value("Base", &settings.base_asset);
    output::key_value("Quote", &settings.quote_asset);
    output::key_value(
        "Gas budget",
        format!(
            "{} MIST ({} SUI)",
            settings.gas_budget,
            from_base_units(settings.gas_budget, SUI_DECIMALS)
        ),
    );
    output::key_value("Order TTL", format!("{}s", settings.order_ttl.as_secs()));
    output::key_value(
        "Level-2 range",
        format!("{}..={}", settings.level2_price_range.0, settings.level2_price_range.1),
    );

    println!();
    output::ok("Configuration valid");
    Ok(())
}
