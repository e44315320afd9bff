//! Scripted chain client and response fixtures.
//!
//! [`MockChainClient`] answers `execute` and `inspect` from queues of JSON
//! responses and records every call it receives, so tests can assert on
//! both what the connector sent and how it read the answer.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::chain::codec::{encode, MoveOrder};
use crate::chain::{ChainClient, InspectResult, MoveCall, OwnedObject, TransactionResult};
use crate::domain::ObjectId;
use crate::error::{Result, TransactionError};
use crate::testkit::config::ADDRESS;

/// Chain client that replays scripted responses.
#[derive(Debug)]
pub struct MockChainClient {
    address: String,
    yielding: bool,
    executions: Mutex<VecDeque<Value>>,
    inspections: Mutex<VecDeque<Value>>,
    owned: Mutex<Vec<OwnedObject>>,
    calls: Mutex<Vec<MoveCall>>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self {
            address: ADDRESS.to_string(),
            yielding: false,
            executions: Mutex::default(),
            inspections: Mutex::default(),
            owned: Mutex::default(),
            calls: Mutex::default(),
        }
    }
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Yield to the scheduler before answering, so concurrent callers
    /// interleave at every chain round trip.
    pub fn yielding(mut self) -> Self {
        self.yielding = true;
        self
    }

    /// Queue a response for the next `execute`.
    pub fn with_execute(self, response: Value) -> Self {
        self.executions.lock().push_back(response);
        self
    }

    /// Queue a response for the next `inspect`.
    pub fn with_inspect(self, response: Value) -> Self {
        self.inspections.lock().push_back(response);
        self
    }

    /// Add an owned object returned by `owned_objects` for its type.
    pub fn with_owned(self, object_id: &str, object_type: &str, version: u64) -> Self {
        self.owned.lock().push(OwnedObject {
            object_id: ObjectId::new(object_id),
            object_type: Some(object_type.to_string()),
            version,
        });
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MoveCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<MoveCall> {
        self.calls.lock().last().cloned()
    }

    async fn pause(&self) {
        if self.yielding {
            tokio::task::yield_now().await;
        }
    }

    fn next(queue: &Mutex<VecDeque<Value>>, call: &MoveCall) -> Result<Value> {
        queue.lock().pop_front().ok_or_else(|| {
            TransactionError::Rpc {
                code: -1,
                message: format!("no scripted response for {}", call.target()),
            }
            .into()
        })
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn active_address(&self) -> &str {
        &self.address
    }

    async fn execute(&self, call: &MoveCall) -> Result<TransactionResult> {
        self.pause().await;
        self.calls.lock().push(call.clone());
        let raw = Self::next(&self.executions, call)?;
        Ok(TransactionResult::from_json(raw)?)
    }

    async fn inspect(&self, call: &MoveCall) -> Result<InspectResult> {
        self.pause().await;
        self.calls.lock().push(call.clone());
        let raw = Self::next(&self.inspections, call)?;
        Ok(InspectResult::from_json(raw)?)
    }

    async fn owned_objects(&self, _owner: &str, struct_type: &str) -> Result<Vec<OwnedObject>> {
        self.pause().await;
        let mut found: Vec<OwnedObject> = self
            .owned
            .lock()
            .iter()
            .filter(|o| o.object_type.as_deref() == Some(struct_type))
            .cloned()
            .collect();
        found.sort_by_key(|o| o.version);
        Ok(found)
    }
}

/// Successful transaction with the given object changes and events.
pub fn transaction(object_changes: Vec<Value>, events: Vec<Value>) -> Value {
    json!({
        "digest": "MockDigest111",
        "effects": {"status": {"status": "success"}},
        "objectChanges": object_changes,
        "events": events
    })
}

/// Transaction that reached the chain and failed with `error`.
pub fn failed_transaction(error: &str) -> Value {
    json!({
        "digest": "MockDigestFailed",
        "effects": {"status": {"status": "failure", "error": error}},
        "objectChanges": [],
        "events": []
    })
}

/// `objectChanges` entry for a created object.
pub fn created(object_type: &str, object_id: &str) -> Value {
    json!({"type": "created", "objectType": object_type, "objectId": object_id})
}

/// Result of `create_account`.
pub fn account_created(package_id: &str, cap_id: &str) -> Value {
    transaction(
        vec![created(&format!("{package_id}::custodian_v2::AccountCap"), cap_id)],
        Vec::new(),
    )
}

/// Result of `create_pool` for the SUI/REALUSDC pair.
pub fn pool_created(package_id: &str, pool_id: &str) -> Value {
    let pool_type =
        format!("{package_id}::clob_v2::Pool<0x2::sui::SUI, {package_id}::realusdc::REALUSDC>");
    transaction(vec![created(&pool_type, pool_id)], Vec::new())
}

/// `OrderPlaced` event with ids in the fullnode's string form.
pub fn order_placed_event(order_id: u64, client_order_id: u64) -> Value {
    json!({
        "type": "0xPKG::clob_v2::OrderPlaced<0x2::sui::SUI, 0xPKG::realusdc::REALUSDC>",
        "parsedJson": {
            "order_id": order_id.to_string(),
            "client_order_id": client_order_id.to_string(),
            "is_bid": true
        }
    })
}

/// Result of a `place_limit_order` whose order rested on the book.
pub fn order_placed(order_id: u64, client_order_id: u64) -> Value {
    transaction(Vec::new(), vec![order_placed_event(order_id, client_order_id)])
}

/// Successful dev-inspect run with the given `(bcs, type)` return values.
pub fn inspect(return_values: Vec<(Vec<u8>, &str)>) -> Value {
    let values: Vec<Value> = return_values
        .into_iter()
        .map(|(bytes, type_tag)| json!([bytes, type_tag]))
        .collect();
    json!({
        "effects": {"status": {"status": "success"}},
        "results": [{"returnValues": values}]
    })
}

/// Dev-inspect run that aborted with `error`.
pub fn failed_inspect(error: &str) -> Value {
    json!({
        "effects": {"status": {"status": "failure", "error": error}},
        "error": error
    })
}

/// Result of `get_level2_book_status_*_side`.
pub fn level2_result(prices: &[u64], depths: &[u64]) -> Value {
    inspect(vec![
        (encode(&prices), "vector<u64>"),
        (encode(&depths), "vector<u64>"),
    ])
}

/// Result of `account_balance`.
pub fn balance_result(
    base_available: u64,
    base_locked: u64,
    quote_available: u64,
    quote_locked: u64,
) -> Value {
    inspect(
        [base_available, base_locked, quote_available, quote_locked]
            .into_iter()
            .map(|v| (encode(&v), "u64"))
            .collect(),
    )
}

/// Fields of a resting order, for [`order_status_result`].
#[derive(Debug, Clone, Copy)]
pub struct OrderFixture {
    pub order_id: u64,
    pub client_order_id: u64,
    pub price: u64,
    pub original_quantity: u64,
    pub quantity: u64,
    pub is_bid: bool,
    pub owner_byte: u8,
    pub expire_timestamp_ms: u64,
}

/// Result of `get_order_status`: the BCS encoding of `clob_v2::Order`.
pub fn order_status_result(order: OrderFixture) -> Value {
    let bytes = encode(&MoveOrder {
        order_id: order.order_id,
        client_order_id: order.client_order_id,
        price: order.price,
        original_quantity: order.original_quantity,
        quantity: order.quantity,
        is_bid: order.is_bid,
        owner: [order.owner_byte; 32],
        expire_timestamp: order.expire_timestamp_ms,
        self_matching_prevention: 0,
    });
    inspect(vec![(bytes, "0xPKG::clob_v2::Order")])
}
