//! Collaborator traits (ports) - define the interfaces the pipeline depends on
//!
//! The domain layer defines what it needs from storage and from the two
//! external platforms; the infrastructure crates provide the implementations.

mod platforms;
mod store;

pub use platforms::{ChatPlatform, PlatformResult, TicketingPlatform};
pub use store::{DedupStore, RecordOutcome, StoreResult};
