//! Typed transaction and dev-inspect responses.
//!
//! Responses are decoded strictly into the fields this crate reads; a
//! missing required field fails the decode instead of surfacing later as an
//! index error. Fields the fullnode adds that nothing here reads are ignored.
//! The raw JSON is kept next to the typed view for diagnostics.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ObjectId;
use crate::error::ResponseError;

/// Outcome reported under `effects.status`.
///
/// The fullnode reports `{"status": "success" | "failure", "error": …}`;
/// summaries produced by client SDKs use `{"succeeded": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExecutionStatus {
    Rpc {
        status: StatusKind,
        #[serde(default)]
        error: Option<String>,
    },
    Flag {
        succeeded: bool,
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Failure,
}

impl ExecutionStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Rpc { status, .. } => *status == StatusKind::Success,
            Self::Flag { succeeded, .. } => *succeeded,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rpc { error, .. } | Self::Flag { error, .. } => error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Effects {
    pub status: ExecutionStatus,
}

/// One entry of `objectChanges`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Published { package_id: ObjectId },
    #[serde(rename_all = "camelCase")]
    Transferred {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Deleted { object_id: ObjectId },
    #[serde(rename_all = "camelCase")]
    Wrapped { object_id: ObjectId },
    #[serde(other)]
    Unknown,
}

impl ObjectChange {
    /// Id and type of a newly created object.
    #[must_use]
    pub fn as_created(&self) -> Option<(&ObjectId, &str)> {
        match self {
            Self::Created {
                object_id,
                object_type,
            } => Some((object_id, object_type)),
            _ => None,
        }
    }
}

/// A Move event emitted by the transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "parsedJson", default)]
    pub parsed_json: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    #[serde(default)]
    pub digest: Option<String>,
    pub effects: Effects,
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}

/// An executed transaction: the typed view plus the raw JSON it came from.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub response: TransactionResponse,
    pub raw: serde_json::Value,
}

impl TransactionResult {
    /// # Errors
    ///
    /// [`ResponseError::Decode`] if required fields are missing or mistyped.
    pub fn from_json(raw: serde_json::Value) -> Result<Self, ResponseError> {
        let response = TransactionResponse::deserialize(&raw).map_err(|source| ResponseError::Decode {
            what: "transaction response",
            source,
        })?;
        Ok(Self { response, raw })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.effects.status.is_success()
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.response.digest.as_deref()
    }
}

/// One `(bcs bytes, move type)` pair from `returnValues`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnValue(pub Vec<u8>, pub String);

impl ReturnValue {
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    #[serde(default)]
    pub return_values: Vec<ReturnValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectResponse {
    pub effects: Effects,
    #[serde(default)]
    pub results: Option<Vec<CommandResult>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A dev-inspect run: the typed view plus the raw JSON it came from.
#[derive(Debug, Clone)]
pub struct InspectResult {
    pub response: InspectResponse,
    pub raw: serde_json::Value,
}

impl InspectResult {
    /// # Errors
    ///
    /// [`ResponseError::Decode`] if required fields are missing or mistyped.
    pub fn from_json(raw: serde_json::Value) -> Result<Self, ResponseError> {
        let response = InspectResponse::deserialize(&raw).map_err(|source| ResponseError::Decode {
            what: "dev-inspect response",
            source,
        })?;
        Ok(Self { response, raw })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.error.is_none() && self.response.effects.status.is_success()
    }
}

/// An object returned by an owned-objects lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObject {
    pub object_id: ObjectId,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
}

/// Move `u64` values arrive as JSON strings; accept plain numbers too.
pub fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Num(u64),
    }

    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Str(s) => s.parse().map_err(serde::de::Error::custom),
        StrOrNum::Num(n) => Ok(n),
    }
}
