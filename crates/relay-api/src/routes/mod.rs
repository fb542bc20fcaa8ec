//! Route definitions

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{events, health};
use crate::middleware::{with_request_timeout, DEFAULT_REQUEST_TIMEOUT};
use crate::state::AppState;

/// Webhook endpoint path
pub const EVENTS_PATH: &str = "/slack/events";

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    create_router_with_timeout(DEFAULT_REQUEST_TIMEOUT)
}

/// Create the main router; `timeout` bounds the health routes only
pub fn create_router_with_timeout(timeout: Duration) -> Router<AppState> {
    Router::new()
        .route(EVENTS_PATH, post(events::receive_event))
        .merge(with_request_timeout(health_routes(), timeout))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
