//! External platform ports - the chat platform and the ticketing system

use async_trait::async_trait;

use crate::entities::{CreatedTicket, Identity, IssueRequest, ReactionSummary, ThreadRoot};
use crate::error::PlatformError;

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Operations consumed from the chat platform
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Live reactions on a message
    async fn reactions_on_message(
        &self,
        channel: &str,
        ts: &str,
    ) -> PlatformResult<Vec<ReactionSummary>>;

    /// The thread root message at `ts`, or `None` if it no longer exists
    async fn thread_root(&self, channel: &str, ts: &str) -> PlatformResult<Option<ThreadRoot>>;

    /// Display name and email for a platform user id
    async fn user_profile(&self, user_id: &str) -> PlatformResult<Identity>;

    /// Post a reply into a thread
    async fn post_message(&self, channel: &str, thread_ts: &str, text: &str)
        -> PlatformResult<()>;
}

/// Operations consumed from the ticketing system
#[async_trait]
pub trait TicketingPlatform: Send + Sync {
    /// Id of the active iteration (sprint) on a board, if any
    async fn active_iteration(&self, board_id: &str) -> PlatformResult<Option<i64>>;

    /// Ticketing account id for an email address, if any
    async fn find_account_by_email(&self, email: &str) -> PlatformResult<Option<String>>;

    /// Create an issue and return its key
    async fn create_issue(&self, request: &IssueRequest) -> PlatformResult<String>;

    /// Browsable URL for an issue key (pure string template)
    fn browse_url(&self, issue_key: &str) -> String;

    /// Create an issue and pair its key with its browsable URL
    async fn create_ticket(&self, request: &IssueRequest) -> PlatformResult<CreatedTicket> {
        let key = self.create_issue(request).await?;
        let url = self.browse_url(&key);
        Ok(CreatedTicket { key, url })
    }
}
