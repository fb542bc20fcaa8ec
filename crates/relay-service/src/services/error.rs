//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use relay_common::AppError;
use relay_core::{DomainError, PlatformError, StoreError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Inbound payload is missing required fields
    MalformedPayload(String),

    /// Dedup store failed while committing
    Store(StoreError),

    /// The ticketing system rejected or never answered the creation request
    TicketCreation { status: Option<u16>, body: String },

    /// Missing or invalid wiring
    Config(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPayload(msg) => write!(f, "Malformed payload: {msg}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::TicketCreation {
                status: Some(status),
                body,
            } => write!(f, "Ticket creation failed with status {status}: {body}"),
            Self::TicketCreation { status: None, body } => {
                write!(f, "Ticket creation failed: {body}")
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a malformed payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap a failed issue submission, keeping the upstream diagnostic
    pub fn ticket_creation(err: PlatformError) -> Self {
        let status = err.status();
        let body = match err {
            PlatformError::Status { body, .. } => body,
            other => other.to_string(),
        };
        Self::TicketCreation { status, body }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedPayload(_) => 400,
            Self::TicketCreation { .. } => 502,
            Self::Store(_) | Self::Config(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            Self::Store(_) => "STORE_ERROR",
            Self::TicketCreation { .. } => "TICKET_CREATION_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if the inbound request itself was at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MalformedPayload(msg) => Self::MalformedPayload(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => AppError::Database(e.to_string()),
            ServiceError::Config(msg) => AppError::Internal(anyhow::anyhow!(msg)),
            other => AppError::internal(other),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
