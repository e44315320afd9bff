//! Exchange trait definitions.
//!
//! These traits are what a trading host sees of the connector: order
//! placement, balances and order book snapshots.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    AccountBalance, ClientOrderId, ExchangeOrderId, Level2Snapshot, OrderRequest, OrderSide,
    TradingPair,
};
use crate::error::Error;

/// Result of submitting a limit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementOutcome {
    pub success: bool,
    pub client_order_id: ClientOrderId,
    /// Set when the order rested on the book.
    pub exchange_order_id: Option<ExchangeOrderId>,
    /// Transaction response as returned by the node.
    pub raw: serde_json::Value,
}

impl PlacementOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Whether the order is now resting on the book.
    #[must_use]
    pub const fn is_resting(&self) -> bool {
        self.success && self.exchange_order_id.is_some()
    }
}

/// Executor for submitting orders to an exchange.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submit a limit order.
    ///
    /// A transaction that reached the chain and failed is reported as an
    /// unsuccessful outcome. Transport and decoding problems are errors.
    async fn place_order(&self, order: &OrderRequest) -> Result<PlacementOutcome, Error>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}

/// Source of account balances.
#[async_trait]
pub trait BalanceTracker: Send + Sync {
    async fn balances(&self) -> Result<AccountBalance, Error>;
}

/// Source of level-2 order book snapshots for one pair.
#[async_trait]
pub trait OrderBookSource: Send + Sync {
    fn trading_pair(&self) -> &TradingPair;

    async fn level2_snapshot(&self, side: OrderSide) -> Result<Level2Snapshot, Error>;
}
