//! Sui JSON-RPC client.
//!
//! Talks to a fullnode over HTTP. Transaction bytes come from a
//! [`TransactionBuilder`] when one is configured; simple calls (pure and
//! object arguments only) fall back to the fullnode's `unsafe_moveCall`.
//! Signing is always delegated to a [`TransactionSigner`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use super::call::MoveCall;
use super::response::{InspectResult, OwnedObject, TransactionResult};
use super::traits::{ChainClient, TransactionBuilder, TransactionSigner};
use crate::error::{Result, TransactionError};

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBytes {
    tx_bytes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedObjectsPage {
    data: Vec<OwnedObjectEntry>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct OwnedObjectEntry {
    #[serde(default)]
    data: Option<OwnedObject>,
}

/// JSON-RPC implementation of [`ChainClient`].
pub struct RpcClient {
    http: reqwest::Client,
    url: Url,
    address: String,
    builder: Option<Arc<dyn TransactionBuilder>>,
    signer: Option<Arc<dyn TransactionSigner>>,
}

impl RpcClient {
    /// Create a client for `rpc_url` acting as `address`.
    ///
    /// # Errors
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be built.
    pub fn new(rpc_url: &str, address: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = Url::parse(rpc_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url,
            address: address.into(),
            builder: None,
            signer: None,
        })
    }

    #[must_use]
    pub fn with_builder(mut self, builder: Arc<dyn TransactionBuilder>) -> Self {
        self.builder = Some(builder);
        self
    }

    /// Use `signer` for execution; its address becomes the active address.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.address = signer.address().to_string();
        self.signer = Some(signer);
        self
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": uuid::Uuid::new_v4().to_string(),
            "method": method,
            "params": params,
        });
        debug!(method = method, url = %self.url, "RPC request");

        let envelope: RpcEnvelope = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = envelope.error {
            return Err(TransactionError::Rpc {
                code: err.code,
                message: err.message,
            }
            .into());
        }
        let result = envelope.result.ok_or(TransactionError::Rpc {
            code: 0,
            message: format!("{method} returned neither result nor error"),
        })?;
        Ok(serde_json::from_value(result)?)
    }

    async fn transaction_data(&self, call: &MoveCall) -> Result<String> {
        if let Some(builder) = &self.builder {
            return builder.transaction_data(&self.address, call).await;
        }
        if !call.is_simple() {
            return Err(TransactionError::Build(format!(
                "{call} splits gas or transfers its result; configure a transaction builder"
            ))
            .into());
        }
        let arguments: Vec<Value> = call.arguments.iter().filter_map(|a| a.to_json()).collect();
        let bytes: TransactionBytes = self
            .request(
                "unsafe_moveCall",
                json!([
                    self.address,
                    call.package,
                    call.module,
                    call.function,
                    call.type_arguments,
                    arguments,
                    Value::Null,
                    call.gas_budget.to_string(),
                ]),
            )
            .await?;
        Ok(bytes.tx_bytes)
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    fn active_address(&self) -> &str {
        &self.address
    }

    async fn execute(&self, call: &MoveCall) -> Result<TransactionResult> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(TransactionError::NoSigner("execute"))?;
        let tx_bytes = self.transaction_data(call).await?;
        let signature = signer.sign(&tx_bytes)?;

        info!(target_fn = %call.target(), sender = %self.address, "Executing transaction");
        let raw: Value = self
            .request(
                "sui_executeTransactionBlock",
                json!([
                    tx_bytes,
                    [signature],
                    {"showEffects": true, "showObjectChanges": true, "showEvents": true},
                    "WaitForLocalExecution",
                ]),
            )
            .await?;
        Ok(TransactionResult::from_json(raw)?)
    }

    async fn inspect(&self, call: &MoveCall) -> Result<InspectResult> {
        let builder = self.builder.as_ref().ok_or_else(|| {
            TransactionError::Build(format!("dev-inspect of {call} needs a transaction builder"))
        })?;
        let kind = builder.transaction_kind(call).await?;
        let raw: Value = self
            .request(
                "sui_devInspectTransactionBlock",
                json!([self.address, kind, Value::Null, Value::Null]),
            )
            .await?;
        Ok(InspectResult::from_json(raw)?)
    }

    async fn owned_objects(&self, owner: &str, struct_type: &str) -> Result<Vec<OwnedObject>> {
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page: OwnedObjectsPage = self
                .request(
                    "suix_getOwnedObjects",
                    json!([
                        owner,
                        {"filter": {"StructType": struct_type}, "options": {"showType": true}},
                        cursor,
                        Value::Null,
                    ]),
                )
                .await?;
            objects.extend(page.data.into_iter().filter_map(|entry| entry.data));
            match page.next_cursor {
                Some(next) if page.has_next_page => cursor = Some(next),
                _ => break,
            }
        }
        objects.sort_by_key(|o| o.version);
        debug!(owner = owner, struct_type = struct_type, count = objects.len(), "Owned objects");
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObjectId;

    #[test]
    fn rejects_invalid_url() {
        assert!(RpcClient::new("not a url", "0x1", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn execute_without_signer_is_refused() {
        let client = RpcClient::new("http://127.0.0.1:1", "0x1", Duration::from_millis(100)).unwrap();
        let call = MoveCall::new(ObjectId::new("0x2"), "clob_v2", "create_account");
        let err = client.execute(&call).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Transaction(TransactionError::NoSigner("execute"))
        ));
    }

    #[tokio::test]
    async fn inspect_without_builder_is_refused() {
        let client = RpcClient::new("http://127.0.0.1:1", "0x1", Duration::from_millis(100)).unwrap();
        let call = MoveCall::new(ObjectId::new("0x2"), "clob_v2", "account_balance");
        let err = client.inspect(&call).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Transaction(TransactionError::Build(_))
        ));
    }
}
