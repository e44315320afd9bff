//! Description of a single Move call transaction.
//!
//! A [`MoveCall`] is what the connector hands to the chain client: one call
//! into a package function, optionally paying a coin split from gas and
//! optionally transferring the call's result back to the sender. Turning it
//! into transaction bytes is the client's job.

use std::fmt;

use serde::Serialize;

use crate::domain::ObjectId;

/// Gas budget used when none is configured, in MIST.
pub const DEFAULT_GAS_BUDGET: u64 = 10_000_000;

/// One argument of a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    Object(ObjectId),
    U64(u64),
    U8(u8),
    Bool(bool),
    /// A coin of `amount` split from the gas coin.
    GasSplit(u64),
}

impl CallArg {
    /// JSON form accepted by the fullnode's `unsafe_moveCall`.
    ///
    /// Returns `None` for [`CallArg::GasSplit`], which has no pure JSON form.
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Object(id) => Some(serde_json::Value::String(id.to_string())),
            Self::U64(v) => Some(serde_json::Value::String(v.to_string())),
            Self::U8(v) => Some(serde_json::Value::from(*v)),
            Self::Bool(v) => Some(serde_json::Value::Bool(*v)),
            Self::GasSplit(_) => None,
        }
    }
}

/// A call to `package::module::function`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
    pub gas_budget: u64,
    /// Transfer the call's return value to the sender.
    pub transfer_result_to_sender: bool,
}

impl MoveCall {
    pub fn new(package: ObjectId, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package,
            module: module.into(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            gas_budget: DEFAULT_GAS_BUDGET,
            transfer_result_to_sender: false,
        }
    }

    #[must_use]
    pub fn type_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_arguments.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: CallArg) -> Self {
        self.arguments.push(arg);
        self
    }

    #[must_use]
    pub const fn gas_budget(mut self, budget: u64) -> Self {
        self.gas_budget = budget;
        self
    }

    #[must_use]
    pub const fn transfer_to_sender(mut self) -> Self {
        self.transfer_result_to_sender = true;
        self
    }

    /// `package::module::function`.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }

    /// Whether the call can be expressed as a plain `unsafe_moveCall`.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.transfer_result_to_sender
            && self
                .arguments
                .iter()
                .all(|a| !matches!(a, CallArg::GasSplit(_)))
    }
}

impl fmt::Display for MoveCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target())?;
        if !self.type_arguments.is_empty() {
            write!(f, "<{}>", self.type_arguments.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_and_display() {
        let call = MoveCall::new(ObjectId::new("0xdee9"), "clob_v2", "create_account")
            .type_args(["0x2::sui::SUI", "0xdee9::realusdc::REALUSDC"]);
        assert_eq!(call.target(), "0xdee9::clob_v2::create_account");
        assert_eq!(
            call.to_string(),
            "0xdee9::clob_v2::create_account<0x2::sui::SUI, 0xdee9::realusdc::REALUSDC>"
        );
        assert_eq!(call.gas_budget, DEFAULT_GAS_BUDGET);
    }

    #[test]
    fn pure_args_serialize_like_the_fullnode_expects() {
        assert_eq!(CallArg::U64(u64::MAX).to_json().unwrap(), "18446744073709551615");
        assert_eq!(CallArg::U8(1).to_json().unwrap(), 1);
        assert_eq!(CallArg::Bool(true).to_json().unwrap(), true);
        assert_eq!(CallArg::Object(ObjectId::clock()).to_json().unwrap(), "0x6");
        assert!(CallArg::GasSplit(5).to_json().is_none());
    }

    #[test]
    fn gas_split_and_transfer_are_not_simple() {
        let base = MoveCall::new(ObjectId::new("0x1"), "m", "f");
        assert!(base.clone().arg(CallArg::U64(1)).is_simple());
        assert!(!base.clone().arg(CallArg::GasSplit(1)).is_simple());
        assert!(!base.transfer_to_sender().is_simple());
    }
}
