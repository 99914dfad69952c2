//! Webhook error types.

use thiserror::Error;

/// Errors raised while receiving webhook callbacks.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing or mismatched `x-line-signature`.
    #[error("invalid signature")]
    InvalidSignature,

    /// The body was signed correctly but is not a valid callback.
    #[error("failed to parse request body: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error, e.g. while binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebhookError {
    /// Whether the sender should be told its request was bad (400) rather
    /// than that the server failed (500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidSignature)
    }
}
