//! Data Transfer Objects for the HTTP surface

mod responses;

pub use responses::{
    ChallengeResponse, HealthChecks, HealthResponse, ReadinessResponse, WebhookAck,
};
