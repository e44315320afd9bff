//! Exchange abstraction layer.
//!
//! Defines the traits a trading host drives the connector through.

mod traits;

pub use traits::{BalanceTracker, OrderBookSource, OrderExecutor, PlacementOutcome};

/// Name the connector reports to its host.
pub const EXCHANGE_NAME: &str = "suidex";
