use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {key}")]
    MissingEnv { key: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while building, signing or executing a transaction.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The transaction reached the chain but did not succeed.
    #[error("transaction failed: {error}")]
    Failed {
        error: String,
        raw: serde_json::Value,
    },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("failed to build transaction: {0}")]
    Build(String),

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("no signer configured; {0} requires a signed transaction")]
    NoSigner(&'static str),
}

/// The chain returned something that does not have the expected shape.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("expected {expected} {what}, found {found}: {raw}")]
    UnexpectedCardinality {
        what: &'static str,
        expected: usize,
        found: usize,
        raw: String,
    },

    #[error("missing field {field} in response: {raw}")]
    MissingField { field: &'static str, raw: String },

    #[error("unexpected type for {what}: expected {expected}, got {actual}")]
    UnexpectedType {
        what: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("malformed BCS value for {what}: {reason}")]
    Bcs { what: &'static str, reason: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
