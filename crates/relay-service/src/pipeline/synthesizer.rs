//! Ticket synthesizer - builds and submits the issue for a resolved message

use relay_core::{CreatedTicket, IssueRequest, Message};
use tracing::{error, info, instrument, warn};

use crate::services::{ServiceContext, ServiceError, ServiceResult};

const SUMMARY_PREFIX: &str = "Slack Request";

/// Issue summary naming the message author when known
pub fn summary_for(author_name: &str) -> String {
    let name = author_name.trim();
    if name.is_empty() {
        SUMMARY_PREFIX.to_string()
    } else {
        format!("{SUMMARY_PREFIX} from {name}")
    }
}

/// Turns a `Message` into a created ticket
pub struct TicketSynthesizer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TicketSynthesizer<'a> {
    /// Create a new TicketSynthesizer
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the creation request, degrading any lookup that fails
    #[instrument(skip(self, message), fields(channel = %message.channel, ts = %message.ts))]
    pub async fn build_request(&self, message: &Message) -> IssueRequest {
        let route = self.ctx.routing().resolve(&message.channel);

        let (iteration_id, assignee_account_id, reporter_account_id) = tokio::join!(
            self.active_iteration(&route.board_id),
            self.account_for(message.reactions.user.email(), "assignee"),
            self.account_for(message.author.email(), "reporter"),
        );

        IssueRequest {
            project_key: route.project_key.clone(),
            parent_key: route.epic_key.clone(),
            summary: summary_for(&message.author.name),
            quoted_text: message.text.clone(),
            source_link: message.permalink(&self.ctx.settings().workspace_url),
            issue_type: self.ctx.settings().issue_type.clone(),
            assignee_account_id,
            reporter_account_id,
            iteration_id,
        }
    }

    /// Submit the issue; never retried here
    pub async fn synthesize(&self, message: &Message) -> ServiceResult<CreatedTicket> {
        let request = self.build_request(message).await;

        match self.ctx.ticketing().create_ticket(&request).await {
            Ok(ticket) => {
                info!(ticket_key = %ticket.key, ticket_url = %ticket.url, "Ticket created");
                Ok(ticket)
            }
            Err(e) => {
                let err = ServiceError::ticket_creation(e);
                error!(
                    project = %request.project_key,
                    error = %err,
                    "Ticket creation failed"
                );
                Err(err)
            }
        }
    }

    async fn active_iteration(&self, board_id: &str) -> Option<i64> {
        match self.ctx.ticketing().active_iteration(board_id).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                info!(board_id, "No active sprint, leaving the ticket unscheduled");
                None
            }
            Err(e) => {
                warn!(board_id, error = %e, "Sprint lookup failed, omitting sprint");
                None
            }
        }
    }

    async fn account_for(&self, email: Option<&str>, role: &'static str) -> Option<String> {
        let email = email?;
        match self.ctx.ticketing().find_account_by_email(email).await {
            Ok(Some(account)) => Some(account),
            Ok(None) => {
                warn!(role, email, "No ticketing account for email");
                None
            }
            Err(e) => {
                warn!(role, email, error = %e, "Account lookup failed, omitting field");
                None
            }
        }
    }
}
