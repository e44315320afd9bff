//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and other methods
//! that validate inputs before anything is sent to the chain.
//!
//! # Examples
//!
//! ```
//! use suidex::domain::error::DomainError;
//! use suidex::domain::order::OrderRequest;
//!
//! let result = OrderRequest::try_new(1_500_000_000, 0, 42);
//! assert!(matches!(result, Err(DomainError::ZeroQuantity)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Orders must have a non-zero quantity.
    #[error("quantity must be non-zero")]
    ZeroQuantity,

    /// An explicit side flag disagrees with the sign of the quantity.
    #[error("quantity {quantity} contradicts is_bid={is_bid}")]
    SideContradiction {
        /// The signed quantity that was provided.
        quantity: i64,
        /// The explicit side flag that was provided.
        is_bid: bool,
    },

    /// Price and depth vectors of a level-2 snapshot must be co-indexed.
    #[error("price levels ({prices}) and depths ({depths}) differ in length")]
    LengthMismatch {
        /// Number of price entries.
        prices: usize,
        /// Number of depth entries.
        depths: usize,
    },

    /// A decimal amount does not fit into on-chain base units.
    #[error("amount {amount} cannot be expressed in base units with {decimals} decimals")]
    UnrepresentableAmount {
        /// The amount that was provided.
        amount: rust_decimal::Decimal,
        /// Decimal places of the asset.
        decimals: u32,
    },
}
