//! Error types for the worker process.

use pow_core::{InputError, NonceHexError};
use thiserror::Error;

/// Result type alias for worker operations
pub type Result<T> = std::result::Result<T, WorkerError>;

/// Failures outside the search itself.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Reading the request or writing the response failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the response failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected command line or environment settings
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request was unusable
    #[error(transparent)]
    Input(#[from] InputError),

    /// The nonce given to `--verify` was not 8 bytes of hex
    #[error(transparent)]
    Nonce(#[from] NonceHexError),
}

impl WorkerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error belongs in the response line rather than on stderr.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Nonce(_))
    }
}
