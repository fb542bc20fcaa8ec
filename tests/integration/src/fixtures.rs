//! Test fixtures
//!
//! Webhook payloads and canned platform responses.

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use crate::helpers::PlatformMocks;

pub const CHANNEL: &str = "C0123ABC";
pub const TS: &str = "1700000000.000100";
pub const REACTOR: &str = "U1";
pub const AUTHOR: &str = "U2";
pub const TRIGGER: &str = "engineer";

/// Endpoint verification handshake
pub fn url_verification(challenge: &str) -> Value {
    json!({
        "token": "legacy",
        "challenge": challenge,
        "type": "url_verification"
    })
}

/// Reaction event delivery on the fixture message
pub fn reaction_event(event_type: &str, reaction: &str) -> Value {
    json!({
        "token": "legacy",
        "team_id": "T1",
        "type": "event_callback",
        "event_id": "Ev1",
        "event": {
            "type": event_type,
            "user": REACTOR,
            "reaction": reaction,
            "item_user": AUTHOR,
            "item": {"type": "message", "channel": CHANNEL, "ts": TS},
            "event_ts": "1700000100.000200"
        }
    })
}

fn trigger_reaction(count: u32) -> Value {
    let users: Vec<String> = (1..=count).map(|n| format!("U{n}")).collect();
    json!({"name": TRIGGER, "count": count, "users": users})
}

impl PlatformMocks {
    /// `reactions.get` reporting the trigger reaction `count` times
    pub async fn mock_reactions(&self, count: u32) -> Mock<'_> {
        self.slack
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/reactions.get")
                    .query_param("channel", CHANNEL)
                    .query_param("timestamp", TS);
                then.status(200).json_body(json!({
                    "ok": true,
                    "type": "message",
                    "message": {"ts": TS, "reactions": [trigger_reaction(count)]}
                }));
            })
            .await
    }

    /// `conversations.replies` returning the fixture thread root
    pub async fn mock_thread_root(&self) -> Mock<'_> {
        self.slack
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/conversations.replies")
                    .query_param("channel", CHANNEL)
                    .query_param("ts", TS);
                then.status(200).json_body(json!({
                    "ok": true,
                    "messages": [{
                        "user": AUTHOR,
                        "text": "checkout is returning 500s",
                        "ts": TS,
                        "reactions": [trigger_reaction(1)]
                    }]
                }));
            })
            .await
    }

    /// `users.info` for the reactor and the author
    pub async fn mock_users(&self) {
        for (id, name, email) in [
            (REACTOR, "Ada Lovelace", "ada@acme.com"),
            (AUTHOR, "Grace Hopper", "grace@acme.com"),
        ] {
            self.slack
                .mock_async(|when, then| {
                    when.method(GET).path("/users.info").query_param("user", id);
                    then.status(200).json_body(json!({
                        "ok": true,
                        "user": {
                            "id": id,
                            "name": id.to_lowercase(),
                            "profile": {"real_name": name, "email": email}
                        }
                    }));
                })
                .await;
        }
    }

    /// `chat.postMessage` accepting any thread reply
    pub async fn mock_post_message(&self) -> Mock<'_> {
        self.slack
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200).json_body(json!({"ok": true, "ts": "1700000200.000300"}));
            })
            .await
    }

    /// Active sprint and account lookups on the ticketing side
    pub async fn mock_jira_lookups(&self) {
        self.jira
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/agile/1.0/board/45/sprint")
                    .query_param("state", "active");
                then.status(200)
                    .json_body(json!({"values": [{"id": 77, "state": "active"}]}));
            })
            .await;

        for (email, account) in [("ada@acme.com", "acc-ada"), ("grace@acme.com", "acc-grace")] {
            self.jira
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/rest/api/3/user/search")
                        .query_param("query", email);
                    then.status(200).json_body(json!([{"accountId": account}]));
                })
                .await;
        }
    }

    /// Issue creation answering with `key`
    pub async fn mock_create_issue(&self, key: &str) -> Mock<'_> {
        let key = key.to_string();
        self.jira
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/3/issue");
                then.status(201).json_body(json!({"id": "10001", "key": key}));
            })
            .await
    }

    /// Issue creation failing with a server error
    pub async fn mock_create_issue_failure(&self) -> Mock<'_> {
        self.jira
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/3/issue");
                then.status(500)
                    .json_body(json!({"errorMessages": ["Internal server error"]}));
            })
            .await
    }

    /// Everything a first `engineer` reaction needs to become a ticket
    pub async fn mock_happy_path(&self) {
        self.mock_reactions(1).await;
        self.mock_thread_root().await;
        self.mock_users().await;
        self.mock_post_message().await;
        self.mock_jira_lookups().await;
    }
}
