//! Order placement requests and on-chain order status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ClientOrderId, ExchangeOrderId};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order.
    Bid,
    /// Sell order.
    Ask,
}

impl OrderSide {
    #[must_use]
    pub const fn is_bid(self) -> bool {
        matches!(self, Self::Bid)
    }

    #[must_use]
    pub const fn from_is_bid(is_bid: bool) -> Self {
        if is_bid {
            Self::Bid
        } else {
            Self::Ask
        }
    }

    /// Lowercase name as used in the `clob_v2` function names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order restriction flag (`u8` on chain).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    #[default]
    NoRestriction,
    ImmediateOrCancel,
    FillOrKill,
    PostOrAbort,
}

impl Restriction {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NoRestriction => 0,
            Self::ImmediateOrCancel => 1,
            Self::FillOrKill => 2,
            Self::PostOrAbort => 3,
        }
    }
}

/// What the pool does when an order would match the owner's own order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfMatchingPrevention {
    #[default]
    CancelOldest,
}

impl SelfMatchingPrevention {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::CancelOldest => 0,
        }
    }
}

/// A validated limit order, ready to be turned into a `place_limit_order` call.
///
/// The side comes from the sign of the requested quantity: negative sells,
/// positive buys. An explicit `is_bid` flag may be passed as well but must
/// agree with the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    price: u64,
    quantity: u64,
    side: OrderSide,
    client_order_id: ClientOrderId,
    restriction: Restriction,
    self_matching_prevention: SelfMatchingPrevention,
    expire_timestamp_ms: Option<u64>,
}

impl OrderRequest {
    /// Creates a request, taking the side from the sign of `quantity`.
    pub fn try_new(price: u64, quantity: i64, client_order_id: u64) -> Result<Self, DomainError> {
        Self::with_side_flag(price, quantity, client_order_id, None)
    }

    /// Creates a request with an optional explicit side flag.
    ///
    /// # Errors
    ///
    /// - [`DomainError::ZeroQuantity`] if `quantity` is zero.
    /// - [`DomainError::SideContradiction`] if `is_bid` disagrees with the sign.
    pub fn with_side_flag(
        price: u64,
        quantity: i64,
        client_order_id: u64,
        is_bid: Option<bool>,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::ZeroQuantity);
        }
        let side = OrderSide::from_is_bid(quantity > 0);
        if let Some(flag) = is_bid {
            if flag != side.is_bid() {
                return Err(DomainError::SideContradiction {
                    quantity,
                    is_bid: flag,
                });
            }
        }
        Ok(Self {
            price,
            quantity: quantity.unsigned_abs(),
            side,
            client_order_id: ClientOrderId::new(client_order_id),
            restriction: Restriction::default(),
            self_matching_prevention: SelfMatchingPrevention::default(),
            expire_timestamp_ms: None,
        })
    }

    #[must_use]
    pub const fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = restriction;
        self
    }

    #[must_use]
    pub const fn with_self_matching_prevention(mut self, smp: SelfMatchingPrevention) -> Self {
        self.self_matching_prevention = smp;
        self
    }

    /// Absolute expiry in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn with_expire_timestamp_ms(mut self, expire_ms: u64) -> Self {
        self.expire_timestamp_ms = Some(expire_ms);
        self
    }

    #[must_use]
    pub const fn price(&self) -> u64 {
        self.price
    }

    /// Unsigned quantity.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    #[must_use]
    pub const fn is_bid(&self) -> bool {
        self.side.is_bid()
    }

    #[must_use]
    pub const fn client_order_id(&self) -> ClientOrderId {
        self.client_order_id
    }

    #[must_use]
    pub const fn restriction(&self) -> Restriction {
        self.restriction
    }

    #[must_use]
    pub const fn self_matching_prevention(&self) -> SelfMatchingPrevention {
        self.self_matching_prevention
    }

    #[must_use]
    pub const fn expire_timestamp_ms(&self) -> Option<u64> {
        self.expire_timestamp_ms
    }
}

/// Lifecycle state derived from an on-chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Open,
    PartiallyFilled,
    Filled,
}

/// A resting order as returned by `clob_v2::get_order_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatus {
    pub order_id: ExchangeOrderId,
    pub client_order_id: ClientOrderId,
    pub price: u64,
    pub original_quantity: u64,
    /// Quantity still resting on the book.
    pub quantity: u64,
    pub is_bid: bool,
    /// Owner address (`0x`-prefixed hex).
    pub owner: String,
    pub expire_timestamp_ms: u64,
    pub self_matching_prevention: u8,
}

impl OrderStatus {
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        OrderSide::from_is_bid(self.is_bid)
    }

    #[must_use]
    pub const fn filled_quantity(&self) -> u64 {
        self.original_quantity.saturating_sub(self.quantity)
    }

    #[must_use]
    pub const fn state(&self) -> OrderState {
        if self.quantity == 0 {
            OrderState::Filled
        } else if self.quantity < self.original_quantity {
            OrderState::PartiallyFilled
        } else {
            OrderState::Open
        }
    }
}
