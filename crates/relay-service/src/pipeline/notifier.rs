//! Notifier - best-effort thread reply announcing the ticket

use relay_core::{CreatedTicket, Message};
use tracing::{info, instrument, warn};

use crate::services::ServiceContext;

/// Reply text announcing who picked the message up
pub fn notification_text(reactor_id: &str, ticket: &CreatedTicket) -> String {
    format!(
        "<@{reactor_id}> picked this up: <{}|{}>",
        ticket.url, ticket.key
    )
}

/// Posts the confirmation reply into the originating thread
pub struct Notifier<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Notifier<'a> {
    /// Create a new Notifier
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post the reply; a failure is logged and the ticket stands
    #[instrument(skip(self, message, ticket), fields(channel = %message.channel, ts = %message.ts, ticket_key = %ticket.key))]
    pub async fn notify(&self, message: &Message, ticket: &CreatedTicket) {
        let text = notification_text(&message.reactions.user_id, ticket);

        match self
            .ctx
            .chat()
            .post_message(&message.channel, message.ts.as_str(), &text)
            .await
        {
            Ok(()) => info!("Thread notified"),
            Err(e) => warn!(error = %e, "Thread notification failed; ticket stands"),
        }
    }
}
