//! Sui chain access.
//!
//! Defines the [`ChainClient`] seam the connector talks through, the
//! [`MoveCall`] it sends, the typed responses it gets back, and a JSON-RPC
//! implementation.

pub mod codec;
mod call;
mod response;
mod rpc;
mod traits;

pub use call::{CallArg, MoveCall, DEFAULT_GAS_BUDGET};
pub use response::{
    u64_from_str_or_num, CommandResult, Effects, Event, ExecutionStatus, InspectResponse,
    InspectResult, ObjectChange, OwnedObject, ReturnValue, StatusKind, TransactionResponse,
    TransactionResult,
};
pub use rpc::RpcClient;
pub use traits::{ChainClient, TransactionBuilder, TransactionSigner};
