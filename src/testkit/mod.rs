//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`chain`] - [`MockChainClient`](chain::MockChainClient) and builders
//!   for the JSON responses a fullnode returns.
//! - [`config`] - Canonical connector settings and environment lookups.

pub mod chain;
pub mod config;
