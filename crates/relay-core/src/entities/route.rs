//! Ticket routing - which project, epic and board a channel files into

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ticketing destination for a source channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRoute {
    pub project_key: String,
    pub epic_key: String,
    pub board_id: String,
}

impl TicketRoute {
    /// Create a new TicketRoute
    pub fn new(
        project_key: impl Into<String>,
        epic_key: impl Into<String>,
        board_id: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            epic_key: epic_key.into(),
            board_id: board_id.into(),
        }
    }
}

/// A per-channel route entry; omitted fields fall back to the default route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOverride {
    pub project_key: Option<String>,
    pub epic_key: Option<String>,
    pub board_id: Option<String>,
}

impl RouteOverride {
    fn apply(self, default: &TicketRoute) -> TicketRoute {
        TicketRoute {
            project_key: self.project_key.unwrap_or_else(|| default.project_key.clone()),
            epic_key: self.epic_key.unwrap_or_else(|| default.epic_key.clone()),
            board_id: self.board_id.unwrap_or_else(|| default.board_id.clone()),
        }
    }
}

/// Static channel → route mapping, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    default: TicketRoute,
    channels: HashMap<String, TicketRoute>,
}

impl RoutingTable {
    /// Build a table from the default route and per-channel overrides
    pub fn new(default: TicketRoute, overrides: HashMap<String, RouteOverride>) -> Self {
        let channels = overrides
            .into_iter()
            .map(|(channel, entry)| (channel, entry.apply(&default)))
            .collect();
        Self { default, channels }
    }

    /// Table with only the default route
    pub fn with_default(default: TicketRoute) -> Self {
        Self {
            default,
            channels: HashMap::new(),
        }
    }

    /// Route for a channel, or the default route when the channel is unmapped
    pub fn resolve(&self, channel: &str) -> &TicketRoute {
        self.channels.get(channel).unwrap_or(&self.default)
    }

    /// The fallback route
    pub fn default_route(&self) -> &TicketRoute {
        &self.default
    }

    /// Number of explicitly mapped channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channel is explicitly mapped
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
