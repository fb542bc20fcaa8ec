//! Idempotency key - deterministic fingerprint of a logical reaction event
//!
//! The key is the hex SHA-256 digest of the event kind, actor, channel,
//! message timestamp and reaction label. Fields are joined with the ASCII
//! unit separator so that no field value can shift bytes into its neighbour.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::entities::{ReactionEvent, ReactionKind};

const FIELD_SEPARATOR: u8 = 0x1f;

/// Fingerprint identifying one logical inbound event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Length of the hex-encoded digest
    pub const LEN: usize = 64;

    /// Derive the key for a normalized reaction event
    pub fn for_event(event: &ReactionEvent) -> Self {
        Self::from_parts(
            event.kind,
            &event.actor_id,
            &event.item.channel,
            event.item.ts.as_str(),
            &event.reaction,
        )
    }

    /// Derive the key from its raw parts
    pub fn from_parts(
        kind: ReactionKind,
        actor_id: &str,
        channel: &str,
        ts: &str,
        reaction: &str,
    ) -> Self {
        let mut hasher = Sha256::new();
        for (i, part) in [kind.as_str(), actor_id, channel, ts, reaction]
            .iter()
            .enumerate()
        {
            if i > 0 {
                hasher.update([FIELD_SEPARATOR]);
            }
            hasher.update(part.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an already computed key (e.g. read back from storage)
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Get the key as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
