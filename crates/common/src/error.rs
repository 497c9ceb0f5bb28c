use thiserror::Error;

/// Common error types used across the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content repository error: {0}")]
    Collaborator(String),

    #[error("Webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook responded with status {status}")]
    Webhook { status: u16 },

    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Delivery worker is shut down")]
    WorkerClosed,
}

impl RelayError {
    /// Whether this error stops the relay from starting, as opposed to
    /// failing a single notification job.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RelayError::Config(_))
    }
}
