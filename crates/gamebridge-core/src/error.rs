//! Error types for `GameBridge` core library.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias using `GameBridge` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `GameBridge` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The main process failed to handle a forwarded call
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed line in a request file
    #[error("Failed to parse request: {0}")]
    Wire(String),

    /// Platform (login API) error
    #[error("Platform error: {0}")]
    Platform(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
