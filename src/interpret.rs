//! Turns raw chain results into domain outcomes.
//!
//! Every function here is a pure read of an already-decoded result. Failed
//! transactions become [`TransactionError::Failed`] with the raw JSON
//! attached; results of the wrong shape become [`ResponseError`]s that carry
//! counts and the offending structure. Nothing is retried.

use serde::Deserialize;
use tracing::{debug, error};

use crate::chain::codec::{decode, decode_u64, decode_vec_u64, MoveOrder};
use crate::chain::{
    u64_from_str_or_num, Effects, Event, InspectResult, ObjectChange, ReturnValue, TransactionResult,
};
use crate::domain::{
    AccountBalance, ClientOrderId, ExchangeOrderId, Level2Snapshot, ObjectId, OrderSide, OrderStatus,
};
use crate::error::{ResponseError, Result, TransactionError};

/// Struct name of the account capability object.
pub const ACCOUNT_CAP_MARKER: &str = "AccountCap";

/// Marker contained in the type of every pool object.
pub const POOL_MARKER: &str = "::Pool<";

const VEC_U64: &str = "vector<u64>";
const U64: &str = "u64";

/// Whether `object_type`'s struct name is `name`, ignoring generic arguments.
#[must_use]
pub fn is_struct_named(object_type: &str, name: &str) -> bool {
    let base = object_type.split('<').next().unwrap_or(object_type);
    base.rsplit("::").next() == Some(name)
}

#[must_use]
pub fn is_pool_type(object_type: &str) -> bool {
    object_type.contains(POOL_MARKER)
}

fn ensure_status(effects: &Effects, extra_error: Option<&str>, raw: &serde_json::Value) -> Result<()> {
    if effects.status.is_success() && extra_error.is_none() {
        return Ok(());
    }
    let message = extra_error
        .or_else(|| effects.status.error())
        .unwrap_or("execution did not succeed")
        .to_string();
    error!(error = %message, raw = %raw, "Transaction failed");
    Err(TransactionError::Failed {
        error: message,
        raw: raw.clone(),
    }
    .into())
}

/// Fails with the raw payload if the transaction did not succeed.
pub fn ensure_success(result: &TransactionResult) -> Result<()> {
    ensure_status(&result.response.effects, None, &result.raw)
}

/// Fails with the raw payload if the dev-inspect run did not succeed.
pub fn ensure_inspect_success(result: &InspectResult) -> Result<()> {
    ensure_status(
        &result.response.effects,
        result.response.error.as_deref(),
        &result.raw,
    )
}

fn raw_field(raw: &serde_json::Value, field: &str) -> String {
    raw.get(field).map_or_else(|| "null".to_string(), ToString::to_string)
}

fn object_changes<'a>(result: &'a TransactionResult) -> Result<&'a [ObjectChange]> {
    result
        .response
        .object_changes
        .as_deref()
        .ok_or_else(|| {
            ResponseError::MissingField {
                field: "objectChanges",
                raw: result.raw.to_string(),
            }
            .into()
        })
}

fn exactly_one<T>(mut found: Vec<T>, what: &'static str, raw: impl FnOnce() -> String) -> Result<T> {
    if found.len() == 1 {
        if let Some(item) = found.pop() {
            return Ok(item);
        }
    }
    Err(ResponseError::UnexpectedCardinality {
        what,
        expected: 1,
        found: found.len(),
        raw: raw(),
    }
    .into())
}

/// The single created object whose type satisfies `matches`.
///
/// # Errors
///
/// Transaction failure, missing `objectChanges`, or anything other than
/// exactly one match.
pub fn created_object(
    result: &TransactionResult,
    what: &'static str,
    matches: impl Fn(&str) -> bool,
) -> Result<ObjectId> {
    ensure_success(result)?;
    let found: Vec<&ObjectId> = object_changes(result)?
        .iter()
        .filter_map(ObjectChange::as_created)
        .filter(|(_, object_type)| matches(object_type))
        .map(|(id, _)| id)
        .collect();
    let id = exactly_one(found, what, || raw_field(&result.raw, "objectChanges"))?;
    debug!(what = what, object_id = %id, "Found created object");
    Ok(id.clone())
}

/// Id of the account capability created by `create_account`.
pub fn account_cap_id(result: &TransactionResult) -> Result<ObjectId> {
    created_object(result, "created AccountCap", |t| is_struct_named(t, ACCOUNT_CAP_MARKER))
}

/// Id of the pool created by `create_pool`.
pub fn pool_id(result: &TransactionResult) -> Result<ObjectId> {
    created_object(result, "created Pool", is_pool_type)
}

/// Id of the package published by the transaction.
pub fn published_package_id(result: &TransactionResult) -> Result<ObjectId> {
    ensure_success(result)?;
    let found: Vec<&ObjectId> = object_changes(result)?
        .iter()
        .filter_map(|change| match change {
            ObjectChange::Published { package_id } => Some(package_id),
            _ => None,
        })
        .collect();
    let id = exactly_one(found, "published package", || raw_field(&result.raw, "objectChanges"))?;
    Ok(id.clone())
}

#[derive(Debug, Deserialize)]
struct OrderPlacedFields {
    #[serde(deserialize_with = "u64_from_str_or_num")]
    order_id: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    client_order_id: u64,
}

fn is_order_placed(event: &Event) -> bool {
    is_struct_named(&event.event_type, "OrderPlaced")
}

/// Exchange order id of the order placed with `client_order_id`.
///
/// `None` if the order never rested on the book, e.g. it filled completely
/// or was cancelled by its restriction.
///
/// # Errors
///
/// Transaction failure, missing `events`, a malformed `OrderPlaced` event,
/// or more than one event for the same client id.
pub fn placed_order_id(
    result: &TransactionResult,
    client_order_id: ClientOrderId,
) -> Result<Option<ExchangeOrderId>> {
    ensure_success(result)?;
    let events = result
        .response
        .events
        .as_deref()
        .ok_or_else(|| ResponseError::MissingField {
            field: "events",
            raw: result.raw.to_string(),
        })?;

    let mut found = Vec::new();
    for event in events.iter().filter(|e| is_order_placed(e)) {
        let fields = OrderPlacedFields::deserialize(&event.parsed_json).map_err(|source| {
            ResponseError::Decode {
                what: "OrderPlaced event",
                source,
            }
        })?;
        if fields.client_order_id == client_order_id.value() {
            found.push(ExchangeOrderId::new(fields.order_id));
        }
    }

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        n => Err(ResponseError::UnexpectedCardinality {
            what: "OrderPlaced event",
            expected: 1,
            found: n,
            raw: raw_field(&result.raw, "events"),
        }
        .into()),
    }
}

/// Return values of the first command of a successful dev-inspect run.
fn return_values<'a>(result: &'a InspectResult, expected: usize, what: &'static str) -> Result<&'a [ReturnValue]> {
    ensure_inspect_success(result)?;
    let first = result
        .response
        .results
        .as_deref()
        .and_then(|results| results.first())
        .ok_or_else(|| ResponseError::MissingField {
            field: "results[0]",
            raw: result.raw.to_string(),
        })?;
    let values = first.return_values.as_slice();
    if values.len() != expected {
        return Err(ResponseError::UnexpectedCardinality {
            what,
            expected,
            found: values.len(),
            raw: raw_field(&result.raw, "results"),
        }
        .into());
    }
    Ok(values)
}

fn expect_type(value: &ReturnValue, what: &'static str, expected: &'static str) -> Result<()> {
    if value.type_tag() == expected {
        Ok(())
    } else {
        Err(ResponseError::UnexpectedType {
            what,
            expected,
            actual: value.type_tag().to_string(),
        }
        .into())
    }
}

/// Level-2 snapshot from `get_level2_book_status_{bid,ask}_side`.
///
/// # Errors
///
/// Inspect failure, anything other than two `vector<u64>` return values,
/// malformed BCS, or price and depth vectors of different lengths.
pub fn level2_snapshot(side: OrderSide, result: &InspectResult) -> Result<Level2Snapshot> {
    let values = return_values(result, 2, "level-2 return values")?;
    expect_type(&values[0], "level-2 prices", VEC_U64)?;
    expect_type(&values[1], "level-2 depths", VEC_U64)?;
    let prices = decode_vec_u64(values[0].bytes(), "level-2 prices")?;
    let depths = decode_vec_u64(values[1].bytes(), "level-2 depths")?;
    debug!(side = %side, levels = prices.len(), "Decoded level-2 snapshot");
    Ok(Level2Snapshot::try_new(side, prices, depths)?)
}

/// Balances from `account_balance`.
pub fn account_balance(result: &InspectResult) -> Result<AccountBalance> {
    let values = return_values(result, 4, "account balance return values")?;
    let mut amounts = [0u64; 4];
    for (slot, value) in amounts.iter_mut().zip(values) {
        expect_type(value, "account balance", U64)?;
        *slot = decode_u64(value.bytes(), "account balance")?;
    }
    let [base_available, base_locked, quote_available, quote_locked] = amounts;
    Ok(AccountBalance::new(
        base_available,
        base_locked,
        quote_available,
        quote_locked,
    ))
}

/// Order from `get_order_status`.
///
/// The value is the BCS encoding of `clob_v2::Order`.
pub fn order_status(result: &InspectResult) -> Result<OrderStatus> {
    let values = return_values(result, 1, "order status return values")?;
    let value = &values[0];
    if !is_struct_named(value.type_tag(), "Order") {
        return Err(ResponseError::UnexpectedType {
            what: "order status",
            expected: "clob_v2::Order",
            actual: value.type_tag().to_string(),
        }
        .into());
    }

    let order: MoveOrder = decode(value.bytes(), "order status")?;
    Ok(order.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::codec::{encode, MoveOrder};
    use crate::domain::DomainError;
    use crate::error::Error;
    use serde_json::json;

    fn tx(value: serde_json::Value) -> TransactionResult {
        TransactionResult::from_json(value).unwrap()
    }

    fn inspect(value: serde_json::Value) -> InspectResult {
        InspectResult::from_json(value).unwrap()
    }

    #[test]
    fn struct_name_matching() {
        assert!(is_struct_named("0xdee9::custodian_v2::AccountCap", "AccountCap"));
        assert!(is_struct_named("...::AccountCap", "AccountCap"));
        assert!(!is_struct_named("0x1::m::AccountCapability", "AccountCap"));
        assert!(is_struct_named("0x1::clob_v2::OrderPlaced<0x2::sui::SUI>", "OrderPlaced"));
        assert!(is_pool_type("0x1::clob_v2::Pool<0x2::sui::SUI, 0x1::usdc::USDC>"));
        assert!(!is_pool_type("0x1::clob_v2::PoolOwnerCap"));
    }

    #[test]
    fn scenario_account_cap_is_found() {
        let result = tx(json!({
            "effects": {"status": {"succeeded": true}},
            "objectChanges": [{"type": "created", "objectType": "...::AccountCap", "objectId": "0xAA"}]
        }));
        assert_eq!(account_cap_id(&result).unwrap(), ObjectId::new("0xAA"));
    }

    #[test]
    fn mutated_account_cap_does_not_count() {
        let result = tx(json!({
            "effects": {"status": {"succeeded": true}},
            "objectChanges": [{"type": "mutated", "objectType": "0x1::c::AccountCap", "objectId": "0xAA"}]
        }));
        assert!(matches!(
            account_cap_id(&result),
            Err(Error::Response(ResponseError::UnexpectedCardinality { found: 0, .. }))
        ));
    }

    #[test]
    fn failed_transaction_surfaces_raw_payload() {
        let result = tx(json!({
            "effects": {"status": {"status": "failure", "error": "InsufficientGas"}},
            "objectChanges": []
        }));
        match account_cap_id(&result) {
            Err(Error::Transaction(TransactionError::Failed { error, raw })) => {
                assert_eq!(error, "InsufficientGas");
                assert_eq!(raw["effects"]["status"]["error"], "InsufficientGas");
            }
            other => panic!("expected failed transaction, got {other:?}"),
        }
    }

    #[test]
    fn missing_object_changes_is_a_shape_error() {
        let result = tx(json!({"effects": {"status": {"succeeded": true}}}));
        assert!(matches!(
            pool_id(&result),
            Err(Error::Response(ResponseError::MissingField { field: "objectChanges", .. }))
        ));
    }

    #[test]
    fn pool_and_package_are_found() {
        let result = tx(json!({
            "effects": {"status": {"status": "success"}},
            "objectChanges": [
                {"type": "published", "packageId": "0xPKG"},
                {"type": "created", "objectType": "0xPKG::clob_v2::Pool<0x2::sui::SUI, 0xPKG::realusdc::REALUSDC>", "objectId": "0xPOOL"},
                {"type": "created", "objectType": "0x2::package::UpgradeCap", "objectId": "0xUP"}
            ]
        }));
        assert_eq!(pool_id(&result).unwrap(), ObjectId::new("0xPOOL"));
        assert_eq!(published_package_id(&result).unwrap(), ObjectId::new("0xPKG"));
    }

    #[test]
    fn placed_order_id_matches_client_id() {
        let result = tx(json!({
            "effects": {"status": {"status": "success"}},
            "events": [
                {"type": "0x1::clob_v2::OrderPlaced<0x2::sui::SUI>", "parsedJson": {"order_id": "11", "client_order_id": "99"}},
                {"type": "0x1::clob_v2::OrderPlaced<0x2::sui::SUI>", "parsedJson": {"order_id": "12", "client_order_id": 100}},
                {"type": "0x1::clob_v2::OrderFilled<0x2::sui::SUI>", "parsedJson": {"order_id": "13"}}
            ]
        }));
        assert_eq!(
            placed_order_id(&result, ClientOrderId::new(100)).unwrap(),
            Some(ExchangeOrderId::new(12))
        );
        assert_eq!(placed_order_id(&result, ClientOrderId::new(5)).unwrap(), None);
    }

    #[test]
    fn malformed_order_placed_event_fails() {
        let result = tx(json!({
            "effects": {"status": {"status": "success"}},
            "events": [{"type": "0x1::clob_v2::OrderPlaced<0x2::sui::SUI>", "parsedJson": {"order_id": "x"}}]
        }));
        assert!(placed_order_id(&result, ClientOrderId::new(1)).is_err());
    }

    fn level2_json(prices: &[u64], depths: &[u64]) -> serde_json::Value {
        json!({
            "effects": {"status": {"status": "success"}},
            "results": [{"returnValues": [
                [encode(&prices), "vector<u64>"],
                [encode(&depths), "vector<u64>"]
            ]}]
        })
    }

    #[test]
    fn level2_snapshot_decodes_both_vectors() {
        let result = inspect(level2_json(&[1_500, 1_400], &[10, 20]));
        let book = level2_snapshot(OrderSide::Bid, &result).unwrap();
        assert_eq!(book.prices(), &[1_500, 1_400]);
        assert_eq!(book.depths(), &[10, 20]);
    }

    #[test]
    fn level2_snapshot_rejects_mismatched_lengths() {
        let result = inspect(level2_json(&[1_500, 1_400], &[10]));
        assert!(matches!(
            level2_snapshot(OrderSide::Ask, &result),
            Err(Error::Domain(DomainError::LengthMismatch { prices: 2, depths: 1 }))
        ));
    }

    #[test]
    fn level2_snapshot_rejects_wrong_types() {
        let result = inspect(json!({
            "effects": {"status": {"status": "success"}},
            "results": [{"returnValues": [[[0], "vector<u64>"], [[0], "vector<u8>"]]}]
        }));
        assert!(matches!(
            level2_snapshot(OrderSide::Bid, &result),
            Err(Error::Response(ResponseError::UnexpectedType { .. }))
        ));
    }

    #[test]
    fn level2_snapshot_requires_results() {
        let result = inspect(json!({"effects": {"status": {"status": "success"}}, "results": []}));
        assert!(matches!(
            level2_snapshot(OrderSide::Bid, &result),
            Err(Error::Response(ResponseError::MissingField { field: "results[0]", .. }))
        ));
    }

    #[test]
    fn inspect_error_is_a_failure() {
        let result = inspect(json!({
            "effects": {"status": {"status": "success"}},
            "error": "MoveAbort in get_level2_book_status_bid_side"
        }));
        assert!(matches!(
            level2_snapshot(OrderSide::Bid, &result),
            Err(Error::Transaction(TransactionError::Failed { .. }))
        ));
    }

    #[test]
    fn account_balance_decodes_four_amounts() {
        let values: Vec<serde_json::Value> = [5u64, 6, 7, 8]
            .iter()
            .map(|v| json!([v.to_le_bytes().to_vec(), "u64"]))
            .collect();
        let result = inspect(json!({
            "effects": {"status": {"status": "success"}},
            "results": [{"returnValues": values}]
        }));
        assert_eq!(
            account_balance(&result).unwrap().as_tuple(),
            (5, 6, 7, 8)
        );
    }

    #[test]
    fn account_balance_rejects_missing_values() {
        let result = inspect(json!({
            "effects": {"status": {"status": "success"}},
            "results": [{"returnValues": [[[0,0,0,0,0,0,0,0], "u64"]]}]
        }));
        assert!(matches!(
            account_balance(&result),
            Err(Error::Response(ResponseError::UnexpectedCardinality { expected: 4, found: 1, .. }))
        ));
    }

    #[test]
    fn order_status_decodes_order_struct() {
        let bytes = encode(&MoveOrder {
            order_id: 7,
            client_order_id: 100_000_000_000_000_001,
            price: 1_500,
            original_quantity: 10,
            quantity: 4,
            is_bid: true,
            owner: [0x11; 32],
            expire_timestamp: 99,
            self_matching_prevention: 0,
        });

        let result = inspect(json!({
            "effects": {"status": {"status": "success"}},
            "results": [{"returnValues": [[bytes, "0xdee9::clob_v2::Order"]]}]
        }));
        let status = order_status(&result).unwrap();
        assert_eq!(status.order_id, ExchangeOrderId::new(7));
        assert_eq!(status.client_order_id.value(), 100_000_000_000_000_001);
        assert_eq!(status.filled_quantity(), 6);
        assert!(status.is_bid);
        assert_eq!(status.owner, format!("0x{}", "11".repeat(32)));
        assert_eq!(status.expire_timestamp_ms, 99);
    }
}
