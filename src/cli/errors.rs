//! CLI error types

use thiserror::Error;

use crate::errors::DbError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the command-line interface.
#[derive(Debug, Error)]
pub enum CliError {
    /// The underlying database operation failed.
    #[error("{0}")]
    Database(#[from] DbError),

    /// Malformed document or filter argument. Fatal for this
    /// invocation only.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Writing the JSON result failed.
    #[error("output failed: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
