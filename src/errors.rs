//! Error types for the KBase knowledge base.
//!
//! Provides the crate-wide error enum plus the provider error taxonomy
//! used by the embedding and generation capabilities.

use thiserror::Error;

/// Errors from the remote AI provider (embeddings and text generation).
///
/// These are always recovered locally by the ranking and enrichment code:
/// a provider failure degrades the result, it never fails a user operation.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider endpoint could not be reached
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    /// Provider returned a non-success HTTP status
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider response could not be decoded
    #[error("Malformed provider response: {0}")]
    Malformed(String),

    /// Provider call exceeded the configured timeout
    #[error("Provider call timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// Main error type for the knowledge base
#[derive(Error, Debug)]
pub enum KbaseError {
    /// Document lookup failures
    #[error("Document not found: {0}")]
    NotFound(uuid::Uuid),

    /// Mutation attempted by a non-owner without admin rights
    #[error("User '{user}' is not authorized to {action} this document")]
    Forbidden { user: String, action: String },

    /// AI provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for knowledge base operations
pub type Result<T> = std::result::Result<T, KbaseError>;

impl From<anyhow::Error> for KbaseError {
    fn from(err: anyhow::Error) -> Self {
        KbaseError::ConfigError(err.to_string())
    }
}
