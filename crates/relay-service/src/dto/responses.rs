//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::PipelineOutcome;
use crate::services::ServiceError;

// ============================================================================
// Webhook Responses
// ============================================================================

/// Echo of an endpoint verification challenge
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

/// Acknowledgement returned to the chat platform for every handled delivery
///
/// The platform only needs a prompt 2xx; the body is for operators.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl WebhookAck {
    fn ok(outcome: &PipelineOutcome) -> Self {
        Self {
            status: "ok",
            outcome: Some(outcome.label()),
            reason: None,
            ticket_key: None,
            ticket_url: None,
            code: None,
        }
    }

    /// Acknowledge a pipeline outcome
    pub fn from_outcome(outcome: &PipelineOutcome) -> Self {
        let ack = Self::ok(outcome);
        match outcome {
            PipelineOutcome::Ignored(reason) => Self {
                reason: Some(reason.as_str()),
                ..ack
            },
            PipelineOutcome::Dropped(reason) => Self {
                reason: Some(reason.as_str()),
                ..ack
            },
            PipelineOutcome::TicketCreated(ticket) => Self {
                ticket_key: Some(ticket.key.clone()),
                ticket_url: Some(ticket.url.clone()),
                ..ack
            },
            PipelineOutcome::Challenge(_) => ack,
        }
    }

    /// Acknowledge a delivery whose processing failed downstream
    pub fn error(err: &ServiceError) -> Self {
        Self {
            status: "error",
            outcome: None,
            reason: None,
            ticket_key: None,
            ticket_url: None,
            code: Some(err.error_code()),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub dedup_store: String,
}

impl ReadinessResponse {
    pub fn ready(dedup_store_healthy: bool) -> Self {
        Self {
            status: if dedup_store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                dedup_store: if dedup_store_healthy { "healthy" } else { "unhealthy" }
                    .to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
