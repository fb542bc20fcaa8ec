//! In-crate fakes for pipeline tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use relay_core::{
    ChatPlatform, DedupStore, Identity, IdempotencyKey, IssueRequest, PlatformError,
    PlatformResult, ReactionSummary, RecordOutcome, RoutingTable, StoreError, StoreResult,
    ThreadRoot, TicketRoute, TicketingPlatform,
};
use relay_db::MemoryDedupStore;
use serde_json::{json, Value};

use crate::services::{PipelineSettings, ServiceContext, ServiceContextBuilder};

pub const CHANNEL: &str = "C1";
pub const TS: &str = "1700000000.000100";
pub const WORKSPACE: &str = "https://acme.slack.com";

#[derive(Default)]
pub struct FakeChat {
    pub reactions: Mutex<Vec<ReactionSummary>>,
    pub reactions_fail: Mutex<bool>,
    pub root: Mutex<Option<ThreadRoot>>,
    pub root_fail: Mutex<bool>,
    pub profiles: Mutex<HashMap<String, Identity>>,
    pub post_fail: Mutex<bool>,
    pub post_delay: Mutex<Option<Duration>>,
    pub reaction_calls: Mutex<usize>,
    pub root_calls: Mutex<usize>,
    pub posted: Mutex<Vec<(String, String, String)>>,
}

impl FakeChat {
    /// A message by U2 carrying one `engineer` reaction from U1
    pub fn with_first_reaction() -> Self {
        let reaction = ReactionSummary::new("engineer", 1, vec!["U1".to_string()]);
        let chat = Self::default();
        *chat.reactions.lock() = vec![reaction.clone()];
        *chat.root.lock() = Some(ThreadRoot {
            author_id: Some("U2".to_string()),
            text: "prod is down".to_string(),
            reactions: vec![reaction],
        });
        chat.profiles.lock().extend([
            ("U1".to_string(), Identity::new("Ada", "ada@example.com")),
            ("U2".to_string(), Identity::new("Grace", "grace@example.com")),
        ]);
        chat
    }

    pub fn post_count(&self) -> usize {
        self.posted.lock().len()
    }
}

fn unavailable() -> PlatformError {
    PlatformError::Transport("connection refused".to_string())
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn reactions_on_message(
        &self,
        _channel: &str,
        _ts: &str,
    ) -> PlatformResult<Vec<ReactionSummary>> {
        *self.reaction_calls.lock() += 1;
        if *self.reactions_fail.lock() {
            return Err(unavailable());
        }
        Ok(self.reactions.lock().clone())
    }

    async fn thread_root(&self, _channel: &str, _ts: &str) -> PlatformResult<Option<ThreadRoot>> {
        *self.root_calls.lock() += 1;
        if *self.root_fail.lock() {
            return Err(unavailable());
        }
        Ok(self.root.lock().clone())
    }

    async fn user_profile(&self, user_id: &str) -> PlatformResult<Identity> {
        self.profiles
            .lock()
            .get(user_id)
            .cloned()
            .ok_or_else(|| PlatformError::Api("user_not_found".to_string()))
    }

    async fn post_message(&self, channel: &str, thread_ts: &str, text: &str) -> PlatformResult<()> {
        let delay = *self.post_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.post_fail.lock() {
            return Err(PlatformError::Api("channel_not_found".to_string()));
        }
        self.posted
            .lock()
            .push((channel.to_string(), thread_ts.to_string(), text.to_string()));
        Ok(())
    }
}

pub struct FakeTicketing {
    pub sprint: Mutex<Option<i64>>,
    pub sprint_fail: Mutex<bool>,
    pub accounts: Mutex<HashMap<String, String>>,
    pub create_fail_status: Mutex<Option<u16>>,
    pub created: Mutex<Vec<IssueRequest>>,
}

impl Default for FakeTicketing {
    fn default() -> Self {
        Self {
            sprint: Mutex::new(Some(812)),
            sprint_fail: Mutex::new(false),
            accounts: Mutex::new(HashMap::from([
                ("ada@example.com".to_string(), "acc-ada".to_string()),
                ("grace@example.com".to_string(), "acc-grace".to_string()),
            ])),
            create_fail_status: Mutex::new(None),
            created: Mutex::new(Vec::new()),
        }
    }
}

impl FakeTicketing {
    pub fn create_count(&self) -> usize {
        self.created.lock().len()
    }
}

#[async_trait]
impl TicketingPlatform for FakeTicketing {
    async fn active_iteration(&self, _board_id: &str) -> PlatformResult<Option<i64>> {
        if *self.sprint_fail.lock() {
            return Err(unavailable());
        }
        Ok(*self.sprint.lock())
    }

    async fn find_account_by_email(&self, email: &str) -> PlatformResult<Option<String>> {
        Ok(self.accounts.lock().get(email).cloned())
    }

    async fn create_issue(&self, request: &IssueRequest) -> PlatformResult<String> {
        if let Some(status) = *self.create_fail_status.lock() {
            return Err(PlatformError::Status {
                status,
                body: "{\"errorMessages\":[\"Internal server error\"]}".to_string(),
            });
        }
        let mut created = self.created.lock();
        created.push(request.clone());
        Ok(format!("{}-{}", request.project_key, 100 + created.len()))
    }

    fn browse_url(&self, issue_key: &str) -> String {
        format!("https://jira.example.com/browse/{issue_key}")
    }
}

/// MemoryDedupStore with switchable failures and a record counter
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryDedupStore,
    pub seen_fail: Mutex<bool>,
    pub record_fail: Mutex<bool>,
    pub record_calls: Mutex<usize>,
}

#[async_trait]
impl DedupStore for FlakyStore {
    async fn seen(&self, key: &IdempotencyKey) -> StoreResult<bool> {
        if *self.seen_fail.lock() {
            return Err(StoreError::Unavailable("read timeout".to_string()));
        }
        self.inner.seen(key).await
    }

    async fn record(&self, key: &IdempotencyKey) -> StoreResult<RecordOutcome> {
        *self.record_calls.lock() += 1;
        if *self.record_fail.lock() {
            return Err(StoreError::Unavailable("write timeout".to_string()));
        }
        self.inner.record(key).await
    }
}

/// A context wired to the given fakes with a routing table for C1
pub struct Harness {
    pub chat: Arc<FakeChat>,
    pub ticketing: Arc<FakeTicketing>,
    pub store: Arc<FlakyStore>,
    pub ctx: ServiceContext,
}

impl Harness {
    pub fn new(chat: FakeChat) -> Self {
        let chat = Arc::new(chat);
        let ticketing = Arc::new(FakeTicketing::default());
        let store = Arc::new(FlakyStore::default());

        let routing = RoutingTable::new(
            TicketRoute::new("TPM", "TPM-36", "45"),
            HashMap::from([(
                "C9".to_string(),
                relay_core::RouteOverride {
                    project_key: Some("OPS".to_string()),
                    epic_key: Some("OPS-7".to_string()),
                    board_id: Some("12".to_string()),
                },
            )]),
        );

        let ctx = ServiceContextBuilder::new()
            .dedup_store(store.clone())
            .chat(chat.clone())
            .ticketing(ticketing.clone())
            .routing(routing)
            .settings(PipelineSettings::new(WORKSPACE))
            .build()
            .unwrap();

        Self {
            chat,
            ticketing,
            store,
            ctx,
        }
    }

    pub fn ready() -> Self {
        Self::new(FakeChat::with_first_reaction())
    }
}

pub fn reaction_payload(event_type: &str, reaction: &str) -> Value {
    json!({
        "type": "event_callback",
        "event": {
            "type": event_type,
            "user": "U1",
            "reaction": reaction,
            "item_user": "U2",
            "item": {"type": "message", "channel": CHANNEL, "ts": TS}
        }
    })
}
