//! Simulation-subsystem error type.

use thiserror::Error;

use mt_core::CoreError;

/// Errors produced when constructing a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration rejected: {0}")]
    Config(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
