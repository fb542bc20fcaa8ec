//! Ticket entities - creation requests and created tickets

use serde::{Deserialize, Serialize};

/// Everything needed to create one issue in the ticketing system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub project_key: String,
    pub parent_key: String,
    pub summary: String,
    /// Original message text, rendered as a quote
    pub quoted_text: String,
    /// Deep link back to the originating conversation
    pub source_link: String,
    pub issue_type: String,
    pub assignee_account_id: Option<String>,
    pub reporter_account_id: Option<String>,
    /// Active sprint, omitted when the board has none
    pub iteration_id: Option<i64>,
}

/// A ticket that was successfully created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub key: String,
    pub url: String,
}

impl CreatedTicket {
    /// Create a new CreatedTicket
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}
