//! Event normalizer - raw webhook payload to canonical event

use relay_core::{DomainError, ItemRef, ReactionEvent, ReactionKind};
use serde_json::Value;

/// What an inbound payload turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// Endpoint verification handshake; the challenge is echoed unchanged
    UrlVerification { challenge: String },
    /// A reaction added or removed
    Reaction(ReactionEvent),
    /// A well-formed callback for an event type the relay does not handle
    Unsupported { event_type: String },
}

/// Map a raw payload into an `InboundPayload`
///
/// Pure function. Fails with `MalformedPayload` when a required field is
/// absent or has the wrong type.
pub fn normalize(payload: &Value) -> Result<InboundPayload, DomainError> {
    if !payload.is_object() {
        return Err(malformed("payload must be a JSON object"));
    }

    if payload.get("type").and_then(Value::as_str) == Some("url_verification") {
        let challenge = required_str(payload, &["challenge"])?;
        return Ok(InboundPayload::UrlVerification {
            challenge: challenge.to_string(),
        });
    }

    let event = payload
        .get("event")
        .filter(|e| e.is_object())
        .ok_or_else(|| malformed("event is required"))?;

    let event_type = required_str(event, &["type"])?;
    let Some(kind) = ReactionKind::from_event_type(event_type) else {
        return Ok(InboundPayload::Unsupported {
            event_type: event_type.to_string(),
        });
    };

    let actor_id = required_str(event, &["user"])?;
    let reaction = required_str(event, &["reaction"])?;
    let channel = required_str(event, &["item", "channel"])?;
    let ts = required_str(event, &["item", "ts"])?;
    let item_owner_id = event
        .get("item_user")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(InboundPayload::Reaction(ReactionEvent {
        kind,
        actor_id: actor_id.to_string(),
        reaction: reaction.to_string(),
        item: ItemRef::new(channel, ts),
        item_owner_id,
    }))
}

fn required_str<'v>(value: &'v Value, path: &[&str]) -> Result<&'v str, DomainError> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| malformed(format!("event.{} is required", path.join("."))))
}

fn malformed(msg: impl Into<String>) -> DomainError {
    DomainError::MalformedPayload(msg.into())
}
