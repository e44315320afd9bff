//! Command-line interface definitions.

pub mod account;
pub mod config;
pub mod ids;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// suidex - DeepBook connector utilities.
#[derive(Parser, Debug)]
#[command(name = "suidex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration
    Config(ConfigPathArg),

    /// Generate client order ids and trade codes
    Ids(IdsArgs),

    /// Look up the account capability owned by the configured address
    AccountCap(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
///
/// Without a path, configuration comes from the environment alone.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `ids` subcommand.
#[derive(Parser, Debug)]
pub struct IdsArgs {
    /// Number of ids to generate
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Prefix for trade codes
    #[arg(long, default_value = crate::domain::id::CLIENT_ID_PREFIX)]
    pub prefix: String,

    /// Length of the random part of trade codes
    #[arg(long, default_value_t = 8)]
    pub length: usize,
}
