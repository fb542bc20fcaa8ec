//! Service context - dependency container for the pipeline
//!
//! Holds the dedup store, the platform clients, the routing table and the
//! pipeline settings. Built once at startup and shared by reference with
//! every request.

use std::sync::Arc;

use relay_core::{ChatPlatform, DedupStore, RoutingTable, TicketingPlatform};

use super::error::{ServiceError, ServiceResult};

/// Default trigger reaction label
pub const DEFAULT_TRIGGER_REACTION: &str = "engineer";

/// Default issue type for created tickets
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Static pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// The reaction label that triggers ticket creation
    pub trigger_reaction: String,
    /// Base URL of the chat workspace, used for deep links
    pub workspace_url: String,
    /// Issue type name on created tickets
    pub issue_type: String,
}

impl PipelineSettings {
    pub fn new(workspace_url: impl Into<String>) -> Self {
        Self {
            trigger_reaction: DEFAULT_TRIGGER_REACTION.to_string(),
            workspace_url: workspace_url.into(),
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
        }
    }

    pub fn with_trigger_reaction(mut self, label: impl Into<String>) -> Self {
        self.trigger_reaction = label.into();
        self
    }

    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }
}

/// Service context containing all pipeline dependencies
#[derive(Clone)]
pub struct ServiceContext {
    dedup_store: Arc<dyn DedupStore>,
    chat: Arc<dyn ChatPlatform>,
    ticketing: Arc<dyn TicketingPlatform>,
    routing: Arc<RoutingTable>,
    settings: PipelineSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        dedup_store: Arc<dyn DedupStore>,
        chat: Arc<dyn ChatPlatform>,
        ticketing: Arc<dyn TicketingPlatform>,
        routing: Arc<RoutingTable>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            dedup_store,
            chat,
            ticketing,
            routing,
            settings,
        }
    }

    /// Get the dedup store
    pub fn dedup_store(&self) -> &dyn DedupStore {
        self.dedup_store.as_ref()
    }

    /// Get the chat platform client
    pub fn chat(&self) -> &dyn ChatPlatform {
        self.chat.as_ref()
    }

    /// Get the ticketing platform client
    pub fn ticketing(&self) -> &dyn TicketingPlatform {
        self.ticketing.as_ref()
    }

    /// Get the channel routing table
    pub fn routing(&self) -> &RoutingTable {
        self.routing.as_ref()
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("dedup_store", &"DedupStore")
            .field("clients", &"...")
            .field("routes", &self.routing.len())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    dedup_store: Option<Arc<dyn DedupStore>>,
    chat: Option<Arc<dyn ChatPlatform>>,
    ticketing: Option<Arc<dyn TicketingPlatform>>,
    routing: Option<Arc<RoutingTable>>,
    settings: Option<PipelineSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dedup_store(mut self, store: Arc<dyn DedupStore>) -> Self {
        self.dedup_store = Some(store);
        self
    }

    pub fn chat(mut self, chat: Arc<dyn ChatPlatform>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn ticketing(mut self, ticketing: Arc<dyn TicketingPlatform>) -> Self {
        self.ticketing = Some(ticketing);
        self
    }

    pub fn routing(mut self, routing: RoutingTable) -> Self {
        self.routing = Some(Arc::new(routing));
        self
    }

    pub fn settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Config` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let settings = self
            .settings
            .ok_or_else(|| ServiceError::config("settings are required"))?;
        if settings.trigger_reaction.trim().is_empty() {
            return Err(ServiceError::config("trigger_reaction must not be empty"));
        }

        Ok(ServiceContext::new(
            self.dedup_store
                .ok_or_else(|| ServiceError::config("dedup_store is required"))?,
            self.chat
                .ok_or_else(|| ServiceError::config("chat is required"))?,
            self.ticketing
                .ok_or_else(|| ServiceError::config("ticketing is required"))?,
            self.routing
                .ok_or_else(|| ServiceError::config("routing is required"))?,
            settings,
        ))
    }
}
