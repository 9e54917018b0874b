//! Error taxonomy for the blueprint API surface.
//!
//! Core tree and explorer operations are total and never return errors;
//! everything that touches configuration, the provider, or the workspace
//! store reports through `ApiError`.

use thiserror::Error;

/// Top-level error type for CLI and library operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration loading, validation, or environment failure.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider resolution, connectivity, or completion failure.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Generation payload did not match the expected schema.
    #[error("Malformed generation payload: {0}")]
    PayloadError(String),

    /// Workspace result store read/write failure.
    #[error("Result store error: {0}")]
    StoreError(String),

    /// Operation is declared but not implemented.
    #[error("Not implemented: {0}")]
    Unsupported(String),
}
