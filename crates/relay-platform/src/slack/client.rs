//! `ChatPlatform` over the Slack Web API

use std::time::Duration;

use async_trait::async_trait;
use relay_core::{ChatPlatform, Identity, PlatformError, PlatformResult, ReactionSummary, ThreadRoot};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use super::types::{Empty, Envelope, ReactionsGetData, RepliesData, UsersInfoData};
use crate::http::{build_client, decode_json, ensure_success, transport_error};

/// Default Web API base URL
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// `conversations.replies` errors meaning the message is gone
const MISSING_MESSAGE_ERRORS: &[&str] = &["thread_not_found", "message_not_found"];

/// Slack Web API client authenticated with a bot token
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl SlackClient {
    /// Create a client; `timeout` bounds every request
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        timeout: Duration,
    ) -> PlatformResult<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into().trim().to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> PlatformResult<Envelope<T>> {
        let response = request
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| transport_error(method, &e))?;
        let response = ensure_success(response).await?;
        decode_json(method, response).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> PlatformResult<T> {
        let envelope = self.send(method, request).await?;
        into_data(method, envelope)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> PlatformResult<T> {
        self.call(method, self.http.get(self.url(method)).query(query))
            .await
    }
}

fn into_data<T>(method: &str, envelope: Envelope<T>) -> PlatformResult<T> {
    if !envelope.ok {
        return Err(PlatformError::Api(format!(
            "{method} failed: {}",
            envelope.error.unwrap_or_else(|| "unknown error".to_string())
        )));
    }
    Ok(envelope.data)
}

#[async_trait]
impl ChatPlatform for SlackClient {
    #[instrument(skip(self))]
    async fn reactions_on_message(
        &self,
        channel: &str,
        ts: &str,
    ) -> PlatformResult<Vec<ReactionSummary>> {
        let data: ReactionsGetData = self
            .get(
                "reactions.get",
                &[("channel", channel), ("timestamp", ts), ("full", "true")],
            )
            .await?;

        Ok(data.message.map(|m| m.reactions).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn thread_root(&self, channel: &str, ts: &str) -> PlatformResult<Option<ThreadRoot>> {
        let method = "conversations.replies";
        let request = self.http.get(self.url(method)).query(&[
            ("channel", channel),
            ("ts", ts),
            ("inclusive", "true"),
            ("limit", "1"),
        ]);
        let envelope: Envelope<RepliesData> = self.send(method, request).await?;

        if !envelope.ok
            && envelope
                .error
                .as_deref()
                .is_some_and(|e| MISSING_MESSAGE_ERRORS.contains(&e))
        {
            debug!(channel, ts, "Message no longer exists");
            return Ok(None);
        }
        let data = into_data(method, envelope)?;

        Ok(data.messages.into_iter().next().map(|m| ThreadRoot {
            author_id: m.user.filter(|u| !u.trim().is_empty()),
            text: m.text,
            reactions: m.reactions,
        }))
    }

    #[instrument(skip(self))]
    async fn user_profile(&self, user_id: &str) -> PlatformResult<Identity> {
        let data: UsersInfoData = self.get("users.info", &[("user", user_id)]).await?;
        let user = data
            .user
            .ok_or_else(|| PlatformError::Decode("users.info response missing user".to_string()))?;

        let email = user.profile.email.clone().unwrap_or_default();
        Ok(Identity::new(user.display_name(), email))
    }

    #[instrument(skip(self, text))]
    async fn post_message(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> PlatformResult<()> {
        let payload = json!({
            "channel": channel,
            "thread_ts": thread_ts,
            "text": text,
        });
        let _: Empty = self
            .call(
                "chat.postMessage",
                self.http.post(self.url("chat.postMessage")).json(&payload),
            )
            .await?;

        debug!(channel, thread_ts, "Posted thread reply");
        Ok(())
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_base", &self.api_base)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}
