//! Signed webhook body extractor
//!
//! Reads the raw body, checks it against the request signature headers and
//! only then parses it as JSON. The signature covers the exact bytes on the
//! wire, so parsing must come second.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
    http::HeaderMap,
};
use relay_common::auth::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use serde_json::Value;
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// JSON body of a request whose signature has been verified
#[derive(Debug, Clone)]
pub struct SignedJson(pub Value);

#[async_trait]
impl<S> FromRequest<S> for SignedJson
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let timestamp = header_value(req.headers(), TIMESTAMP_HEADER);
        let signature = header_value(req.headers(), SIGNATURE_HEADER);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::malformed(e.body_text()))?;

        if !app_state
            .verifier()
            .is_valid_request(&body, timestamp.as_deref(), signature.as_deref())
        {
            warn!(
                has_timestamp = timestamp.is_some(),
                has_signature = signature.is_some(),
                "Rejected request with invalid signature"
            );
            return Err(ApiError::InvalidSignature);
        }

        let value = serde_json::from_slice(&body).map_err(|e| ApiError::malformed(e.to_string()))?;

        Ok(SignedJson(value))
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
