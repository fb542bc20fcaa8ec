//! Event pipeline - the idempotent orchestration of one inbound delivery
//!
//! `Received -> Normalized -> DedupChecked -> GateChecked -> Resolved ->
//! TicketCreated -> Notified -> Committed`. The dedup record is written only
//! after a ticket was created, so every earlier exit leaves the event
//! eligible for redelivery.

use relay_core::{IdempotencyKey, ReactionEvent, ReactionKind, RecordOutcome};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::gate::ReactionGate;
use super::normalizer::{normalize, InboundPayload};
use super::notifier::Notifier;
use super::outcome::{DropReason, IgnoreReason, PipelineOutcome};
use super::resolver::MessageResolver;
use super::synthesizer::TicketSynthesizer;
use crate::services::{ServiceContext, ServiceError, ServiceResult};

/// Orchestrates the pipeline components for one request
pub struct EventPipeline<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventPipeline<'a> {
    /// Create a new EventPipeline
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a raw webhook payload
    ///
    /// # Errors
    /// `MalformedPayload` when normalization fails, `TicketCreation` when the
    /// ticketing system rejects the issue, `Store` when the final commit fails.
    pub async fn handle(&self, payload: &Value) -> ServiceResult<PipelineOutcome> {
        match normalize(payload)? {
            InboundPayload::UrlVerification { challenge } => {
                info!("Answering endpoint verification");
                Ok(PipelineOutcome::Challenge(challenge))
            }
            InboundPayload::Unsupported { event_type } => {
                info!(%event_type, "Ignoring unsupported event type");
                Ok(PipelineOutcome::Ignored(IgnoreReason::UnsupportedEvent))
            }
            InboundPayload::Reaction(event) => self.process(&event).await,
        }
    }

    /// Run a normalized reaction event through the state machine
    #[instrument(
        skip(self, event),
        fields(
            kind = event.kind.as_str(),
            channel = %event.item.channel,
            ts = %event.item.ts,
            reaction = %event.reaction,
        )
    )]
    pub async fn process(&self, event: &ReactionEvent) -> ServiceResult<PipelineOutcome> {
        let key = IdempotencyKey::for_event(event);

        if self.already_handled(&key).await {
            info!(%key, outcome = "ignored", "Event already handled");
            return Ok(PipelineOutcome::Ignored(IgnoreReason::AlreadyHandled));
        }

        let trigger = self.ctx.settings().trigger_reaction.as_str();
        if event.kind == ReactionKind::Removed {
            info!(actor = %event.actor_id, "Reaction removed");
            return Ok(PipelineOutcome::Ignored(IgnoreReason::ReactionRemoved));
        }
        if !event.is_addition_of(trigger) {
            return Ok(PipelineOutcome::Ignored(IgnoreReason::NotTrigger));
        }

        let channel = event.item.channel.as_str();
        let ts = event.item.ts.as_str();

        match ReactionGate::new(self.ctx)
            .is_first_occurrence(channel, ts, trigger)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                info!(outcome = "ignored", "Trigger reaction already present");
                return Ok(PipelineOutcome::Ignored(IgnoreReason::NotFirstOccurrence));
            }
            Err(e) => {
                warn!(error = %e, outcome = "dropped", "Reaction gate lookup failed");
                return Ok(PipelineOutcome::Dropped(DropReason::GateUnavailable));
            }
        }

        let message = match MessageResolver::new(self.ctx).resolve(event).await {
            Ok(Some(message)) => message,
            Ok(None) => {
                info!(outcome = "dropped", "Message not found");
                return Ok(PipelineOutcome::Dropped(DropReason::MessageNotFound));
            }
            Err(e) => {
                warn!(error = %e, outcome = "dropped", "Message lookup failed");
                return Ok(PipelineOutcome::Dropped(DropReason::MessageUnavailable));
            }
        };

        let ticket = TicketSynthesizer::new(self.ctx).synthesize(&message).await?;

        Notifier::new(self.ctx).notify(&message, &ticket).await;

        match self.ctx.dedup_store().record(&key).await {
            Ok(RecordOutcome::Inserted) => {}
            Ok(RecordOutcome::AlreadyPresent) => {
                warn!(%key, "Concurrent delivery committed the same event first");
            }
            Err(e) => {
                warn!(%key, ticket_key = %ticket.key, error = %e, "Dedup commit failed after ticket creation");
                return Err(ServiceError::Store(e));
            }
        }

        info!(%key, ticket_key = %ticket.key, outcome = "ticket_created", "Event committed");
        Ok(PipelineOutcome::TicketCreated(ticket))
    }

    /// A failed read counts as not seen
    async fn already_handled(&self, key: &IdempotencyKey) -> bool {
        match self.ctx.dedup_store().seen(key).await {
            Ok(seen) => seen,
            Err(e) => {
                warn!(%key, error = %e, "Dedup lookup failed, treating event as new");
                false
            }
        }
    }
}
