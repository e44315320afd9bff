//! suidex - DeepBook order book connector for Sui.
//!
//! This crate places limit orders on a DeepBook (`clob_v2`) pool and reads
//! its state back, turning raw chain results into typed outcomes.
//!
//! # Modules
//!
//! - [`config`] - Configuration from TOML files and per-network environment keys
//! - [`domain`] - Order ids, orders, book snapshots, balances
//! - [`chain`] - The [`ChainClient`](chain::ChainClient) seam, Move call
//!   descriptions, typed responses and a JSON-RPC client
//! - [`interpret`] - Raw transaction and dev-inspect results to domain values
//! - [`connector`] - [`DeepbookConnector`](connector::DeepbookConnector), one
//!   method per pool operation
//! - [`exchange`] - Traits a trading host drives the connector through
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted chain client and response fixtures for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use suidex::chain::RpcClient;
//! use suidex::config::Config;
//! use suidex::connector::DeepbookConnector;
//!
//! # async fn run() -> suidex::error::Result<()> {
//! let config = Config::from_env()?;
//! let client = RpcClient::new(&config.rpc_url(), "0xA11CE", config.rpc_timeout())?;
//! let connector = DeepbookConnector::new(Arc::new(client), config.deepbook_settings()?);
//! let bids = connector.level2_bids().await?;
//! println!("best bid: {:?}", bids.best());
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod cli;
pub mod config;
pub mod connector;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod interpret;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
