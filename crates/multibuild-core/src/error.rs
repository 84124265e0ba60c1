//! Error types for the multibuild core library.

use thiserror::Error;

/// Result type alias using the multibuild core Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for multibuild operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging/tracing initialisation error
    #[error("Logging error: {0}")]
    Logging(String),
}
