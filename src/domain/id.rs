//! Identifier types and client-side identifier generation.
//!
//! The on-chain book requires the caller to choose a `client_order_id` for
//! every order but does nothing to keep those ids unique. Two generators
//! live here:
//!
//! - [`ClientOrderId::at`] / [`ClientOrderId::now`]: `10^17 + unix seconds`.
//!   Calls within the same second return the same value.
//! - [`ClientOrderIdSequencer`]: the same base, bumped so that one process
//!   never hands out the same id twice.
//!
//! [`TradeCode`] produces short human-readable codes for log correlation.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Offset that keeps client ids out of the range of exchange sequence ids.
pub const CLIENT_ORDER_ID_BASE: u64 = 100_000_000_000_000_000;

/// Alphabet for trade codes; excludes `0 O 1 I L`.
pub const TRADE_CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Prefix used when tagging client trade codes.
pub const CLIENT_ID_PREFIX: &str = "HBOT";

/// Longest client trade code the host accepts.
pub const MAX_ID_LEN: usize = 32;

/// Sui object identifier (`0x`-prefixed hex).
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new `ObjectId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The shared clock object.
    #[must_use]
    pub fn clock() -> Self {
        Self::new("0x6")
    }

    /// Get the object ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Caller-chosen order tag sent with `place_limit_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientOrderId(u64);

impl ClientOrderId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Time-based id for the given instant: `10^17 + whole unix seconds`.
    ///
    /// Instants before the epoch map to the bare base.
    #[must_use]
    pub fn at(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self(CLIENT_ORDER_ID_BASE + secs)
    }

    /// Time-based id for the current second. Not unique within a second.
    #[must_use]
    pub fn now() -> Self {
        Self::at(SystemTime::now())
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order id assigned by the pool when an order rests on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeOrderId(u64);

impl ExchangeOrderId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExchangeOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExchangeOrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Hands out strictly increasing client order ids.
///
/// Starts from the time-based id and never goes backwards, so ids stay in
/// the `10^17 + seconds` range while staying unique within one process.
/// Separate processes sharing an account can still collide.
#[derive(Debug, Default)]
pub struct ClientOrderIdSequencer {
    last: AtomicU64,
}

impl ClientOrderIdSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the current time.
    pub fn next(&self) -> ClientOrderId {
        self.next_at(SystemTime::now())
    }

    /// Next id based on the given instant.
    pub fn next_at(&self, time: SystemTime) -> ClientOrderId {
        let candidate = ClientOrderId::at(time).value();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(current + 1);
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return ClientOrderId::new(next),
                Err(actual) => current = actual,
            }
        }
    }
}

/// Short code for correlating trades in logs. No uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeCode(String);

impl TradeCode {
    /// Random code of exactly `len` characters from [`TRADE_CODE_ALPHABET`].
    #[must_use]
    pub fn generate(len: usize) -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..len)
            .map(|_| TRADE_CODE_ALPHABET[rng.gen_range(0..TRADE_CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// `prefix` followed by a random code, `MAX_ID_LEN` characters at most.
    ///
    /// The random part shrinks to fit; a prefix longer than the limit is cut.
    #[must_use]
    pub fn with_prefix(prefix: &str, len: usize) -> Self {
        let prefix: String = prefix.chars().take(MAX_ID_LEN).collect();
        let room = MAX_ID_LEN - prefix.chars().count();
        let suffix = Self::generate(len.min(room));
        Self(format!("{prefix}{}", suffix.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
