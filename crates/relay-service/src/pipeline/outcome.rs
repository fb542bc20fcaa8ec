//! Terminal states of one pipeline run

use relay_core::CreatedTicket;

/// Why an event was ignored without side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The idempotency key is already recorded
    AlreadyHandled,
    /// A reaction was removed; logged for audit only
    ReactionRemoved,
    /// A different reaction label was added
    NotTrigger,
    /// The trigger reaction was already present on the message
    NotFirstOccurrence,
    /// An event type the relay does not handle
    UnsupportedEvent,
}

impl IgnoreReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyHandled => "already_handled",
            Self::ReactionRemoved => "reaction_removed",
            Self::NotTrigger => "not_trigger",
            Self::NotFirstOccurrence => "not_first_occurrence",
            Self::UnsupportedEvent => "unsupported_event",
        }
    }
}

/// Why an event was dropped before a ticket was created
///
/// No record is written, so a later redelivery may succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Live reaction state could not be read
    GateUnavailable,
    /// The message no longer exists
    MessageNotFound,
    /// The message could not be fetched
    MessageUnavailable,
}

impl DropReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GateUnavailable => "gate_unavailable",
            Self::MessageNotFound => "message_not_found",
            Self::MessageUnavailable => "message_unavailable",
        }
    }
}

/// Result of handling one inbound payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Endpoint verification handshake
    Challenge(String),
    Ignored(IgnoreReason),
    Dropped(DropReason),
    /// A ticket was created and the key committed
    TicketCreated(CreatedTicket),
}

impl PipelineOutcome {
    /// Short outcome name for logs and acknowledgements
    pub fn label(&self) -> &'static str {
        match self {
            Self::Challenge(_) => "challenge",
            Self::Ignored(_) => "ignored",
            Self::Dropped(_) => "dropped",
            Self::TicketCreated(_) => "ticket_created",
        }
    }
}
