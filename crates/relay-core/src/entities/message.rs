//! Message entities - the reacted-to chat message

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::reaction::{ReactionSummary, Reactions};
use crate::value_objects::MessageTs;

/// Thread root as returned by the chat platform, before identity resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRoot {
    /// Platform id of the author (absent for some bot messages)
    pub author_id: Option<String>,
    pub text: String,
    pub reactions: Vec<ReactionSummary>,
}

impl ThreadRoot {
    /// Find the reaction entry with the given label
    pub fn reaction(&self, label: &str) -> Option<&ReactionSummary> {
        self.reactions.iter().find(|r| r.name == label)
    }
}

/// The chat message that caused the trigger
///
/// Only constructed after the reaction gate confirmed first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author_id: Option<String>,
    pub author: Identity,
    pub text: String,
    pub channel: String,
    pub ts: MessageTs,
    pub reactions: Reactions,
}

impl Message {
    /// Deep link back to the message in the chat workspace
    pub fn permalink(&self, workspace_url: &str) -> String {
        format!(
            "{}/archives/{}/{}",
            workspace_url.trim_end_matches('/'),
            self.channel,
            self.ts.permalink_segment()
        )
    }
}
