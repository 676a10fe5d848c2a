//! DataDesk error type.

use thiserror::Error;

/// Errors shared across the DataDesk crates.
#[derive(Error, Debug)]
pub enum DataDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected client input. The only error class that surfaces as a 4xx.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, DataDeskError>;
