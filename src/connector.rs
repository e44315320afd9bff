//! DeepBook pool connector.
//!
//! [`DeepbookConnector`] maps each pool operation onto one `clob_v2` Move
//! call, sends it through a [`ChainClient`] and interprets the result with
//! [`crate::interpret`]. Writes are executed; reads (book, balance, order
//! status) run as dev-inspect calls and never touch chain state.
//!
//! The account capability is looked up lazily and cached. Hosts that want
//! one created on first use call [`DeepbookConnector::ensure_account`] at
//! startup.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::chain::{CallArg, ChainClient, MoveCall, TransactionResult};
use crate::config::{is_sui_type, DeepbookSettings};
use crate::domain::{
    AccountBalance, ClientOrderId, ClientOrderIdSequencer, ExchangeOrderId, Level2Snapshot,
    ObjectId, OrderRequest, OrderSide, OrderStatus, TradeCode, TradingPair, SUI_DECIMALS,
};
use crate::domain::money::to_base_units;
use crate::error::{Error, ResponseError, Result, TransactionError};
use crate::exchange::{BalanceTracker, OrderBookSource, OrderExecutor, PlacementOutcome, EXCHANGE_NAME};
use crate::interpret;

/// Move module holding the order book entry points.
pub const CLOB_MODULE: &str = "clob_v2";

/// Module and struct of the account capability.
pub const ACCOUNT_CAP_STRUCT: &str = "custodian_v2::AccountCap";

/// Length of the trade code attached to placement logs.
const TRADE_CODE_LEN: usize = 8;

/// Where deposited funds come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositSource {
    /// Split `amount` from the gas coin. Only valid for SUI.
    Gas(u64),
    /// An owned coin object of the right type, deposited whole.
    Coin(ObjectId),
}

impl DepositSource {
    /// A gas split of `amount` SUI, e.g. `1.5`.
    pub fn sui(amount: Decimal) -> Result<Self> {
        Ok(Self::Gas(to_base_units(amount, SUI_DECIMALS)?))
    }

    fn to_arg(&self) -> CallArg {
        match self {
            Self::Gas(amount) => CallArg::GasSplit(*amount),
            Self::Coin(id) => CallArg::Object(id.clone()),
        }
    }
}

/// Outcome of a write that has no domain result of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionOutcome {
    pub digest: Option<String>,
    pub raw: serde_json::Value,
}

impl From<TransactionResult> for TransactionOutcome {
    fn from(result: TransactionResult) -> Self {
        Self {
            digest: result.digest().map(str::to_string),
            raw: result.raw,
        }
    }
}

/// Connector for one DeepBook pool.
pub struct DeepbookConnector<C: ChainClient + ?Sized> {
    client: Arc<C>,
    settings: DeepbookSettings,
    pair: TradingPair,
    account_cap: RwLock<Option<ObjectId>>,
    /// Held while the account capability is looked up or created.
    resolving: Mutex<()>,
    ids: ClientOrderIdSequencer,
}

impl<C: ChainClient + ?Sized> DeepbookConnector<C> {
    pub fn new(client: Arc<C>, settings: DeepbookSettings) -> Self {
        let pair = TradingPair::from_type_tags(&settings.base_asset, &settings.quote_asset);
        let account_cap = RwLock::new(settings.account_cap.clone());
        Self {
            client,
            settings,
            pair,
            account_cap,
            resolving: Mutex::new(()),
            ids: ClientOrderIdSequencer::new(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &DeepbookSettings {
        &self.settings
    }

    #[must_use]
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    /// Next client order id, strictly greater than any handed out before.
    pub fn next_client_order_id(&self) -> ClientOrderId {
        self.ids.next()
    }

    /// Builds a request with a fresh client order id.
    ///
    /// The side comes from the sign of `quantity`; `is_bid`, when given,
    /// must agree with it.
    pub fn new_order(&self, price: u64, quantity: i64, is_bid: Option<bool>) -> Result<OrderRequest> {
        let id = self.next_client_order_id();
        Ok(OrderRequest::with_side_flag(price, quantity, id.value(), is_bid)?)
    }

    /// The cached account capability, if known.
    #[must_use]
    pub fn cached_account_cap(&self) -> Option<ObjectId> {
        self.account_cap.read().clone()
    }

    fn call(&self, function: &str) -> MoveCall {
        MoveCall::new(self.settings.package_id.clone(), CLOB_MODULE, function)
            .gas_budget(self.settings.gas_budget)
    }

    /// A call on the configured pool, with the pool's type arguments.
    fn pool_call(&self, function: &str) -> MoveCall {
        self.call(function)
            .type_args(self.settings.type_arguments())
            .arg(CallArg::Object(self.settings.pool_object_id.clone()))
    }

    fn account_cap_type(&self) -> String {
        format!("{}::{ACCOUNT_CAP_STRUCT}", self.settings.package_id)
    }

    /// Creates a new account capability, transferred to the active address.
    #[instrument(skip(self))]
    pub async fn create_account(&self) -> Result<ObjectId> {
        let call = self.call("create_account").transfer_to_sender();
        let result = self.client.execute(&call).await?;
        let id = interpret::account_cap_id(&result)?;
        info!(account_cap = %id, "Created account capability");
        *self.account_cap.write() = Some(id.clone());
        Ok(id)
    }

    /// Newest account capability owned by the active address.
    async fn find_owned_account_cap(&self) -> Result<Option<ObjectId>> {
        let owner = self.client.active_address();
        let owned = self
            .client
            .owned_objects(owner, &self.account_cap_type())
            .await?;
        if owned.len() > 1 {
            warn!(count = owned.len(), "Multiple account capabilities owned, using the newest");
        }
        Ok(owned.last().map(|found| found.object_id.clone()))
    }

    fn no_account_cap(&self) -> Error {
        ResponseError::UnexpectedCardinality {
            what: "owned AccountCap",
            expected: 1,
            found: 0,
            raw: format!("owner={}", self.client.active_address()),
        }
        .into()
    }

    /// The account capability used for pool operations.
    ///
    /// Resolution order: cache, then the newest capability owned by the
    /// active address, then (if `create_if_missing`) a newly created one.
    /// Concurrent callers are serialized, so at most one capability is
    /// created and all of them get the same id.
    pub async fn account_cap(&self, create_if_missing: bool) -> Result<ObjectId> {
        if let Some(id) = self.cached_account_cap() {
            return Ok(id);
        }

        let _resolving = self.resolving.lock().await;
        if let Some(id) = self.cached_account_cap() {
            return Ok(id);
        }

        if let Some(id) = self.find_owned_account_cap().await? {
            debug!(account_cap = %id, "Found owned account capability");
            *self.account_cap.write() = Some(id.clone());
            return Ok(id);
        }

        if create_if_missing {
            return self.create_account().await;
        }
        Err(self.no_account_cap())
    }

    /// Looks the account capability up on chain, ignoring the cache.
    ///
    /// The cache is replaced with what was found.
    #[instrument(skip(self))]
    pub async fn lookup_account_cap(&self) -> Result<ObjectId> {
        let _resolving = self.resolving.lock().await;
        let id = self
            .find_owned_account_cap()
            .await?
            .ok_or_else(|| self.no_account_cap())?;
        let previous = self.account_cap.write().replace(id.clone());
        if let Some(previous) = previous.filter(|p| *p != id) {
            warn!(configured = %previous, owned = %id, "Configured account capability is not the one owned on chain");
        }
        Ok(id)
    }

    /// Resolves the account capability, creating one if none exists.
    pub async fn ensure_account(&self) -> Result<ObjectId> {
        self.account_cap(true).await
    }

    async fn deposit(&self, function: &'static str, asset: &str, source: DepositSource) -> Result<TransactionOutcome> {
        if let DepositSource::Gas(_) = source {
            if !is_sui_type(asset) {
                return Err(TransactionError::Build(format!(
                    "{function}: only SUI can be split from the gas coin, asset is {asset}"
                ))
                .into());
            }
        }
        let cap = self.account_cap(false).await?;
        let call = self
            .pool_call(function)
            .arg(source.to_arg())
            .arg(CallArg::Object(cap));
        let result = self.client.execute(&call).await?;
        interpret::ensure_success(&result)?;
        info!(function, digest = ?result.digest(), "Deposit executed");
        Ok(result.into())
    }

    /// Deposits base asset into the pool account.
    #[instrument(skip(self))]
    pub async fn deposit_base(&self, source: DepositSource) -> Result<TransactionOutcome> {
        let asset = self.settings.base_asset.clone();
        self.deposit("deposit_base", &asset, source).await
    }

    /// Deposits quote asset into the pool account.
    #[instrument(skip(self))]
    pub async fn deposit_quote(&self, source: DepositSource) -> Result<TransactionOutcome> {
        let asset = self.settings.quote_asset.clone();
        self.deposit("deposit_quote", &asset, source).await
    }

    fn expire_timestamp_ms(&self, order: &OrderRequest) -> u64 {
        order.expire_timestamp_ms().unwrap_or_else(|| {
            let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
            let ttl = u64::try_from(self.settings.order_ttl.as_millis()).unwrap_or(u64::MAX);
            now.saturating_add(ttl)
        })
    }

    /// Places a limit order.
    ///
    /// # Errors
    ///
    /// [`TransactionError::Failed`] if the transaction did not succeed;
    /// the error carries the raw response.
    pub async fn place_limit_order(&self, order: &OrderRequest) -> Result<PlacementOutcome> {
        let trade = TradeCode::with_prefix(crate::domain::id::CLIENT_ID_PREFIX, TRADE_CODE_LEN);
        let cap = self.account_cap(false).await?;
        let client_order_id = order.client_order_id();
        let call = self
            .pool_call("place_limit_order")
            .arg(CallArg::U64(client_order_id.value()))
            .arg(CallArg::U64(order.price()))
            .arg(CallArg::U64(order.quantity()))
            .arg(CallArg::U8(order.self_matching_prevention().code()))
            .arg(CallArg::Bool(order.is_bid()))
            .arg(CallArg::U64(self.expire_timestamp_ms(order)))
            .arg(CallArg::U8(order.restriction().code()))
            .arg(CallArg::Object(ObjectId::clock()))
            .arg(CallArg::Object(cap));

        debug!(
            trade = %trade,
            client_order_id = %client_order_id,
            side = %order.side(),
            price = order.price(),
            quantity = order.quantity(),
            "Placing limit order"
        );
        let result = self.client.execute(&call).await?;
        let exchange_order_id = interpret::placed_order_id(&result, client_order_id)?;
        info!(
            trade = %trade,
            client_order_id = %client_order_id,
            exchange_order_id = ?exchange_order_id.map(|id| id.value()),
            "Limit order placed"
        );
        Ok(PlacementOutcome {
            success: true,
            client_order_id,
            exchange_order_id,
            raw: result.raw,
        })
    }

    /// Resting depth on one side of the book, within the configured price range.
    pub async fn level2_book_status(&self, side: OrderSide) -> Result<Level2Snapshot> {
        let (low, high) = self.settings.level2_price_range;
        let call = self
            .pool_call(&format!("get_level2_book_status_{side}_side"))
            .arg(CallArg::U64(low))
            .arg(CallArg::U64(high))
            .arg(CallArg::Object(ObjectId::clock()));
        let result = self.client.inspect(&call).await?;
        interpret::level2_snapshot(side, &result)
    }

    pub async fn level2_bids(&self) -> Result<Level2Snapshot> {
        self.level2_book_status(OrderSide::Bid).await
    }

    pub async fn level2_asks(&self) -> Result<Level2Snapshot> {
        self.level2_book_status(OrderSide::Ask).await
    }

    /// Available and locked balances of the pool account.
    pub async fn account_balance(&self) -> Result<AccountBalance> {
        let cap = self.account_cap(false).await?;
        let call = self.pool_call("account_balance").arg(CallArg::Object(cap));
        let result = self.client.inspect(&call).await?;
        interpret::account_balance(&result)
    }

    /// Status of one of the account's resting orders.
    pub async fn order_status(&self, order_id: ExchangeOrderId) -> Result<OrderStatus> {
        let cap = self.account_cap(false).await?;
        let call = self
            .pool_call("get_order_status")
            .arg(CallArg::U64(order_id.value()))
            .arg(CallArg::Object(cap));
        let result = self.client.inspect(&call).await?;
        interpret::order_status(&result)
    }

    /// Creates a pool for the configured asset pair.
    ///
    /// `creation_fee` is split from the gas coin and must match what the
    /// package charges.
    #[instrument(skip(self))]
    pub async fn create_pool(&self, tick_size: u64, lot_size: u64, creation_fee: u64) -> Result<ObjectId> {
        let call = self
            .call("create_pool")
            .type_args(self.settings.type_arguments())
            .arg(CallArg::U64(tick_size))
            .arg(CallArg::U64(lot_size))
            .arg(CallArg::GasSplit(creation_fee));
        let result = self.client.execute(&call).await?;
        let id = interpret::pool_id(&result)?;
        info!(pool = %id, "Created pool");
        Ok(id)
    }
}

#[async_trait]
impl<C: ChainClient + ?Sized> OrderExecutor for DeepbookConnector<C> {
    async fn place_order(&self, order: &OrderRequest) -> Result<PlacementOutcome> {
        match self.place_limit_order(order).await {
            Err(Error::Transaction(TransactionError::Failed { raw, .. })) => Ok(PlacementOutcome {
                success: false,
                client_order_id: order.client_order_id(),
                exchange_order_id: None,
                raw,
            }),
            other => other,
        }
    }

    fn exchange_name(&self) -> &'static str {
        EXCHANGE_NAME
    }
}

#[async_trait]
impl<C: ChainClient + ?Sized> BalanceTracker for DeepbookConnector<C> {
    async fn balances(&self) -> Result<AccountBalance> {
        self.account_balance().await
    }
}

#[async_trait]
impl<C: ChainClient + ?Sized> OrderBookSource for DeepbookConnector<C> {
    fn trading_pair(&self) -> &TradingPair {
        &self.pair
    }

    async fn level2_snapshot(&self, side: OrderSide) -> Result<Level2Snapshot> {
        self.level2_book_status(side).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::chain::{self, MockChainClient};
    use crate::testkit::config::settings_with_cap;

    fn connector(client: MockChainClient) -> (Arc<MockChainClient>, DeepbookConnector<MockChainClient>) {
        let client = Arc::new(client);
        let connector = DeepbookConnector::new(Arc::clone(&client), settings_with_cap());
        (client, connector)
    }

    #[tokio::test]
    async fn pool_calls_carry_type_arguments_and_pool() {
        let (client, connector) = connector(MockChainClient::new().with_inspect(chain::level2_result(&[100], &[5])));
        let snapshot = connector.level2_bids().await.unwrap();
        assert_eq!(snapshot.prices(), &[100]);

        let call = client.last_call().unwrap();
        assert_eq!(call.target(), "0xPKG::clob_v2::get_level2_book_status_bid_side");
        assert_eq!(call.type_arguments, vec!["0x2::sui::SUI", "0xPKG::realusdc::REALUSDC"]);
        assert_eq!(call.arguments[0], CallArg::Object(ObjectId::new("0xPOOL")));
        assert_eq!(call.arguments[2], CallArg::U64(1_000_000_000_000));
        assert_eq!(call.arguments[3], CallArg::Object(ObjectId::clock()));
    }

    #[tokio::test]
    async fn gas_deposit_of_non_sui_asset_is_rejected() {
        let (client, connector) = connector(MockChainClient::new());
        let err = connector.deposit_quote(DepositSource::Gas(10)).await.unwrap_err();
        assert!(matches!(err, Error::Transaction(TransactionError::Build(_))));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn order_executor_reports_failed_placement() {
        let (_, connector) = connector(MockChainClient::new().with_execute(chain::failed_transaction("MoveAbort")));
        let order = connector.new_order(1_500_000_000, 100, None).unwrap();
        let outcome = connector.place_order(&order).await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.client_order_id, order.client_order_id());
        assert_eq!(connector.exchange_name(), "suidex");
    }

    #[test]
    fn new_orders_get_increasing_ids() {
        let (_, connector) = connector(MockChainClient::new());
        let a = connector.new_order(1, 1, None).unwrap();
        let b = connector.new_order(1, -1, Some(false)).unwrap();
        assert!(b.client_order_id() > a.client_order_id());
        assert!(!b.is_bid());
    }
}
