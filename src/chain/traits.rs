//! Chain client trait definitions.
//!
//! [`ChainClient`] is the seam between the connector and whatever submits
//! transactions to Sui. [`TransactionBuilder`] and [`TransactionSigner`] are
//! the narrower seams [`RpcClient`](super::RpcClient) uses for the parts that
//! need the Sui SDK: BCS transaction bytes and key material.

use async_trait::async_trait;

use super::call::MoveCall;
use super::response::{InspectResult, OwnedObject, TransactionResult};
use crate::error::Result;

/// Submits Move calls and reads chain state.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address that signs and pays for transactions.
    fn active_address(&self) -> &str;

    /// Sign and execute a call. An on-chain failure is still `Ok`; the
    /// returned result carries the failed status.
    async fn execute(&self, call: &MoveCall) -> Result<TransactionResult>;

    /// Run a call read-only and return its Move return values.
    async fn inspect(&self, call: &MoveCall) -> Result<InspectResult>;

    /// Objects of `struct_type` owned by `owner`, oldest first.
    async fn owned_objects(&self, owner: &str, struct_type: &str) -> Result<Vec<OwnedObject>>;
}

/// Produces BCS transaction bytes for a call.
#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    /// Base64 `TransactionData`, ready to sign.
    async fn transaction_data(&self, sender: &str, call: &MoveCall) -> Result<String>;

    /// Base64 `TransactionKind` for dev-inspect.
    async fn transaction_kind(&self, call: &MoveCall) -> Result<String>;
}

/// Signs transaction bytes on behalf of one address.
pub trait TransactionSigner: Send + Sync {
    fn address(&self) -> &str;

    /// Base64 serialized signature over base64 `TransactionData`.
    fn sign(&self, tx_bytes: &str) -> Result<String>;
}
