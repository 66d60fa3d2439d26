//! Framework error type.
//!
//! Sub-crates define their own error enums (`RegistryError`, `NavError`,
//! `StoreError`, …) and the `fleet-sim` facade folds them into `FleetError`
//! via `From` impls.  `CoreError` covers configuration validation, the only
//! failure inside `fleet-core` itself.  Reading a config file is the
//! caller's job.

use thiserror::Error;

/// The error type for `fleet-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
