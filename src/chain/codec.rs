//! BCS decoding of Move return values.
//!
//! Dev-inspect returns each value as raw BCS bytes plus its Move type. The
//! order book functions return `u64`, `vector<u64>` and `clob_v2::Order`;
//! all of them decode through `bcs` into plain serde types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{ClientOrderId, ExchangeOrderId, OrderStatus};
use crate::error::ResponseError;

/// Decodes one complete BCS value. Trailing bytes are rejected.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], what: &'static str) -> Result<T, ResponseError> {
    bcs::from_bytes(bytes).map_err(|e| ResponseError::Bcs {
        what,
        reason: e.to_string(),
    })
}

/// Decodes a `vector<u64>` value.
pub fn decode_vec_u64(bytes: &[u8], what: &'static str) -> Result<Vec<u64>, ResponseError> {
    decode(bytes, what)
}

/// Decodes a `u64` value.
pub fn decode_u64(bytes: &[u8], what: &'static str) -> Result<u64, ResponseError> {
    decode(bytes, what)
}

/// Field layout of `clob_v2::Order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOrder {
    pub order_id: u64,
    pub client_order_id: u64,
    pub price: u64,
    pub original_quantity: u64,
    pub quantity: u64,
    pub is_bid: bool,
    pub owner: [u8; 32],
    pub expire_timestamp: u64,
    pub self_matching_prevention: u8,
}

impl From<MoveOrder> for OrderStatus {
    fn from(order: MoveOrder) -> Self {
        Self {
            order_id: ExchangeOrderId::new(order.order_id),
            client_order_id: ClientOrderId::new(order.client_order_id),
            price: order.price,
            original_quantity: order.original_quantity,
            quantity: order.quantity,
            is_bid: order.is_bid,
            owner: format!("0x{}", hex::encode(order.owner)),
            expire_timestamp_ms: order.expire_timestamp,
            self_matching_prevention: order.self_matching_prevention,
        }
    }
}

/// BCS encoding of `value`; used to build dev-inspect fixtures.
#[cfg(any(test, feature = "testkit"))]
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    bcs::to_bytes(value).expect("fixture values are BCS-encodable")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> MoveOrder {
        MoveOrder {
            order_id: 7,
            client_order_id: 100_000_000_000_000_001,
            price: 1_500,
            original_quantity: 10,
            quantity: 4,
            is_bid: true,
            owner: [0x11; 32],
            expire_timestamp: 99,
            self_matching_prevention: 0,
        }
    }

    #[test]
    fn decodes_vector_of_u64() {
        let bytes = encode(&vec![1_500_000_000u64, 7]);
        assert_eq!(decode_vec_u64(&bytes, "prices").unwrap(), vec![1_500_000_000, 7]);
    }

    #[test]
    fn decodes_empty_vector() {
        assert_eq!(decode_vec_u64(&[0], "prices").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn decodes_long_length_prefix() {
        let values: Vec<u64> = (0..200).collect();
        let bytes = encode(&values);
        assert_eq!(bytes[..2], [0xc8, 0x01]);
        assert_eq!(decode_vec_u64(&bytes, "depths").unwrap(), values);
    }

    #[test]
    fn rejects_truncated_vector() {
        let mut bytes = encode(&vec![1u64, 2]);
        bytes.pop();
        assert!(matches!(
            decode_vec_u64(&bytes, "prices"),
            Err(ResponseError::Bcs { what: "prices", .. })
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = encode(&5u64);
        bytes.push(0);
        assert!(decode_u64(&bytes, "balance").is_err());
    }

    #[test]
    fn rejects_non_canonical_length() {
        assert!(decode_vec_u64(&[0x80, 0x00], "prices").is_err());
    }

    #[test]
    fn order_layout_is_fixed_width() {
        // 5 u64, bool, 32-byte address, u64, u8
        assert_eq!(encode(&order()).len(), 5 * 8 + 1 + 32 + 8 + 1);
    }

    #[test]
    fn order_maps_to_status_with_hex_owner() {
        let status = OrderStatus::from(decode::<MoveOrder>(&encode(&order()), "order").unwrap());
        assert_eq!(status.order_id, ExchangeOrderId::new(7));
        assert_eq!(status.owner, format!("0x{}", "11".repeat(32)));
        assert_eq!(status.expire_timestamp_ms, 99);
    }

    #[test]
    fn rejects_invalid_bool_in_order() {
        let mut bytes = encode(&order());
        bytes[40] = 2;
        assert!(decode::<MoveOrder>(&bytes, "order").is_err());
    }
}
