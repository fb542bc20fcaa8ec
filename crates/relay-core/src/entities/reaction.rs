//! Reaction entities - inbound reaction events and reaction snapshots

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use crate::value_objects::MessageTs;

/// Whether a reaction was added to or removed from a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Added,
    Removed,
}

impl ReactionKind {
    /// Event type name used by the chat platform
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "reaction_added",
            Self::Removed => "reaction_removed",
        }
    }

    /// Parse the chat platform's event type name
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "reaction_added" => Some(Self::Added),
            "reaction_removed" => Some(Self::Removed),
            _ => None,
        }
    }
}

/// The message a reaction was applied to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub channel: String,
    pub ts: MessageTs,
}

impl ItemRef {
    /// Create a new ItemRef
    pub fn new(channel: impl Into<String>, ts: impl Into<MessageTs>) -> Self {
        Self {
            channel: channel.into(),
            ts: ts.into(),
        }
    }
}

/// Canonical form of one inbound reaction webhook
///
/// Constructed once per inbound payload and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub kind: ReactionKind,
    /// Platform id of the user who reacted
    pub actor_id: String,
    /// Reaction label without colons (e.g. `engineer`)
    pub reaction: String,
    pub item: ItemRef,
    /// Platform id of the reacted-to message's author, when the platform sends it
    pub item_owner_id: Option<String>,
}

impl ReactionEvent {
    /// Check if this event adds the given reaction label
    #[inline]
    pub fn is_addition_of(&self, label: &str) -> bool {
        self.kind == ReactionKind::Added && self.reaction == label
    }
}

/// Live reaction state on a message as reported by the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub users: Vec<String>,
}

impl ReactionSummary {
    /// Create a new ReactionSummary
    pub fn new(name: impl Into<String>, count: u32, users: Vec<String>) -> Self {
        Self {
            name: name.into(),
            count,
            users,
        }
    }
}

/// Snapshot of the triggering reaction at observation time
///
/// Not a live object: the count may change after it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub label: String,
    /// Platform id of the reacting user
    pub user_id: String,
    pub user: Identity,
    pub count: u32,
}
