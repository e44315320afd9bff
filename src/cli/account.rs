//! Handler for the `account-cap` command.

use std::path::Path;
use std::sync::Arc;

use crate::chain::RpcClient;
use crate::cli::{config, output};
use crate::connector::DeepbookConnector;
use crate::error::{ConfigError, Result};

/// Execute `account-cap`.
///
/// Always asks the chain; a configured capability id is not trusted.
/// Creating one needs a signer.
pub async fn execute(path: Option<&Path>) -> Result<()> {
    let config = config::load(path)?;
    config.init_logging();
    let network = config.network();
    let address = config
        .wallet
        .address
        .clone()
        .ok_or_else(|| ConfigError::MissingEnv {
            key: network.env_key("ADDRESS"),
        })?;

    let client = RpcClient::new(&config.rpc_url(), address, config.rpc_timeout())?;
    let connector = DeepbookConnector::new(Arc::new(client), config.deepbook_settings()?);
    let cap = connector.lookup_account_cap().await?;

    output::key_value("Account cap", &cap);
    Ok(())
}
