//! Error types for the Notion period Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or linking period rows.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Shared secret mismatch
    #[error("Not allowed: {0}")]
    Unauthorized(String),

    /// No period row matched a lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// The external store rejected a property name or value
    #[error("Schema error: {0}")]
    Schema(String),

    /// The external workspace API failed
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// Outbound HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// 402 for a secret mismatch matches the original API contract. Only
    /// `Validation` and `Unauthorized` are mapped to a response by the
    /// handlers; everything else propagates to the runtime.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Unauthorized(_) => 402,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }
}
