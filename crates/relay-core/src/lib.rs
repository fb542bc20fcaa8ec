//! # relay-core
//!
//! Domain layer containing entities, value objects, collaborator traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CreatedTicket, Identity, IssueRequest, ItemRef, Message, ReactionEvent, ReactionKind,
    ReactionSummary, Reactions, RouteOverride, RoutingTable, ThreadRoot, TicketRoute,
};
pub use error::{DomainError, PlatformError, StoreError};
pub use traits::{
    ChatPlatform, DedupStore, PlatformResult, RecordOutcome, StoreResult, TicketingPlatform,
};
pub use value_objects::{IdempotencyKey, MessageTs};
