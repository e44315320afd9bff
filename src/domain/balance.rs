//! Custodian balances of one trading account in one pool.

use serde::Serialize;

/// Available and locked amounts for both assets of a pool, in base units.
///
/// Locked amounts back resting orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub base_available: u64,
    pub base_locked: u64,
    pub quote_available: u64,
    pub quote_locked: u64,
}

impl AccountBalance {
    #[must_use]
    pub const fn new(base_available: u64, base_locked: u64, quote_available: u64, quote_locked: u64) -> Self {
        Self {
            base_available,
            base_locked,
            quote_available,
            quote_locked,
        }
    }

    /// The four amounts in contract order.
    #[must_use]
    pub const fn as_tuple(&self) -> (u64, u64, u64, u64) {
        (
            self.base_available,
            self.base_locked,
            self.quote_available,
            self.quote_locked,
        )
    }

    #[must_use]
    pub const fn base_total(&self) -> u128 {
        self.base_available as u128 + self.base_locked as u128
    }

    #[must_use]
    pub const fn quote_total(&self) -> u128 {
        self.quote_available as u128 + self.quote_locked as u128
    }
}
