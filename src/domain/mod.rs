//! Exchange-facing domain types: identifiers, orders, book snapshots, balances.

pub mod balance;
pub mod book;
pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod pair;

pub use balance::AccountBalance;
pub use book::{Level2Snapshot, PriceLevel};
pub use error::DomainError;
pub use id::{ClientOrderId, ClientOrderIdSequencer, ExchangeOrderId, ObjectId, TradeCode};
pub use money::{from_base_units, to_base_units, ONE_SUI, SUI_DECIMALS};
pub use order::{OrderRequest, OrderSide, OrderState, OrderStatus, Restriction, SelfMatchingPrevention};
pub use pair::TradingPair;
