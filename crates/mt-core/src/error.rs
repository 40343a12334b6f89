//! Base error type.
//!
//! Sub-crates define their own error enums (`NetError`, `SimError`) and wrap
//! `CoreError` as a variant where they need it.

use thiserror::Error;

/// Errors produced by `mt-core` itself.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `mt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
