//! Shared reqwest plumbing for the platform clients

use std::time::Duration;

use relay_core::PlatformError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

const MAX_ERROR_BODY_CHARS: usize = 800;

/// Build a client with JSON defaults and a per-request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, PlatformError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("reaction-relay/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout.max(Duration::from_millis(1)))
        .build()
        .map_err(|e| PlatformError::Transport(format!("failed to build http client: {e}")))
}

/// Map a send failure (connect, timeout) to a transport error
pub(crate) fn transport_error(operation: &str, e: &reqwest::Error) -> PlatformError {
    if e.is_timeout() {
        PlatformError::Transport(format!("{operation} timed out"))
    } else {
        PlatformError::Transport(format!("{operation} request failed: {e}"))
    }
}

/// Reject non-2xx responses, keeping the upstream status and body
pub(crate) async fn ensure_success(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

/// Decode a JSON response body
pub(crate) async fn decode_json<T: DeserializeOwned>(
    operation: &str,
    response: Response,
) -> Result<T, PlatformError> {
    response
        .json::<T>()
        .await
        .map_err(|e| PlatformError::Decode(format!("failed to decode {operation}: {e}")))
}

fn status_error(status: StatusCode, body: &str) -> PlatformError {
    PlatformError::Status {
        status: status.as_u16(),
        body: truncate_for_error(body, MAX_ERROR_BODY_CHARS),
    }
}

pub(crate) fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
