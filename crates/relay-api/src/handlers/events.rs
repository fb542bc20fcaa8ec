//! Webhook handler for chat platform events
//!
//! POST /slack/events

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use relay_service::dto::{ChallengeResponse, WebhookAck};
use relay_service::{EventPipeline, PipelineOutcome};
use tracing::{error, info};

use crate::extractors::SignedJson;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Receive one event delivery
///
/// Every pipeline outcome is acknowledged with 200 so the platform does not
/// treat it as a failed delivery. Only inbound faults (signature, payload)
/// are rejected.
pub async fn receive_event(
    State(state): State<AppState>,
    SignedJson(payload): SignedJson,
) -> ApiResult<Response> {
    let context = state.shared_context();

    // Runs to completion even if this request future is dropped.
    let result = tokio::spawn(async move { EventPipeline::new(&context).handle(&payload).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Event pipeline task failed");
            ApiError::internal(e.to_string())
        })?;

    match result {
        Ok(PipelineOutcome::Challenge(challenge)) => {
            Ok(Json(ChallengeResponse { challenge }).into_response())
        }
        Ok(outcome) => {
            info!(outcome = outcome.label(), "Event handled");
            Ok(Json(WebhookAck::from_outcome(&outcome)).into_response())
        }
        Err(e) if e.is_client_error() => Err(ApiError::Service(e)),
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Event processing failed");
            Ok(Json(WebhookAck::error(&e)).into_response())
        }
    }
}
