//! Domain errors - error types for the domain layer and its collaborators

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Errors raised by the deduplication store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dedup store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the chat or ticketing platform clients
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("api error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// Upstream HTTP status, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
