//! Wire types for the Slack Web API methods used by the relay

use relay_core::ReactionSummary;
use serde::Deserialize;

/// Every Web API response wraps its payload in an `ok`/`error` envelope
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct Empty {}

/// `reactions.get`
#[derive(Debug, Deserialize)]
pub(super) struct ReactionsGetData {
    pub message: Option<ReactedItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReactedItem {
    #[serde(default)]
    pub reactions: Vec<ReactionSummary>,
}

/// `conversations.replies`
#[derive(Debug, Deserialize)]
pub(super) struct RepliesData {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMessage {
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reactions: Vec<ReactionSummary>,
}

/// `users.info`
#[derive(Debug, Deserialize)]
pub(super) struct UsersInfoData {
    pub user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireUser {
    pub name: Option<String>,
    pub real_name: Option<String>,
    #[serde(default)]
    pub profile: WireProfile,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireProfile {
    pub real_name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl WireUser {
    /// Best available display name
    pub fn display_name(&self) -> String {
        [
            self.profile.real_name.as_deref(),
            self.profile.display_name.as_deref(),
            self.real_name.as_deref(),
            self.name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or_default()
        .to_string()
    }
}
