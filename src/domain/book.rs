//! Level-2 order book snapshots.
//!
//! The pool reports one side of the book as two parallel vectors: price
//! levels and the total depth resting at each of them. [`Level2Snapshot`]
//! keeps them together and refuses to be built from vectors of different
//! lengths.
//!
//! # Examples
//!
//! ```
//! use suidex::domain::book::Level2Snapshot;
//! use suidex::domain::order::OrderSide;
//!
//! let book = Level2Snapshot::try_new(OrderSide::Bid, vec![100, 99], vec![5, 7]).unwrap();
//! assert_eq!(book.levels().count(), 2);
//! assert_eq!(book.total_depth(), 12);
//!
//! assert!(Level2Snapshot::try_new(OrderSide::Bid, vec![100], vec![]).is_err());
//! ```

use serde::Serialize;

use super::error::DomainError;
use super::order::OrderSide;

/// A single price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    pub price: u64,
    pub depth: u64,
}

/// One side of the book, co-indexed price and depth vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level2Snapshot {
    side: OrderSide,
    prices: Vec<u64>,
    depths: Vec<u64>,
}

impl Level2Snapshot {
    /// # Errors
    ///
    /// [`DomainError::LengthMismatch`] if the vectors differ in length.
    pub fn try_new(side: OrderSide, prices: Vec<u64>, depths: Vec<u64>) -> Result<Self, DomainError> {
        if prices.len() != depths.len() {
            return Err(DomainError::LengthMismatch {
                prices: prices.len(),
                depths: depths.len(),
            });
        }
        Ok(Self {
            side,
            prices,
            depths,
        })
    }

    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    #[must_use]
    pub fn prices(&self) -> &[u64] {
        &self.prices
    }

    #[must_use]
    pub fn depths(&self) -> &[u64] {
        &self.depths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.prices
            .iter()
            .zip(&self.depths)
            .map(|(&price, &depth)| PriceLevel { price, depth })
    }

    /// Best level: highest price for bids, lowest for asks.
    #[must_use]
    pub fn best(&self) -> Option<PriceLevel> {
        match self.side {
            OrderSide::Bid => self.levels().max_by_key(|l| l.price),
            OrderSide::Ask => self.levels().min_by_key(|l| l.price),
        }
    }

    #[must_use]
    pub fn total_depth(&self) -> u128 {
        self.depths.iter().map(|&d| u128::from(d)).sum()
    }

    /// Consumes the snapshot, returning `(prices, depths)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u64>, Vec<u64>) {
        (self.prices, self.depths)
    }
}
