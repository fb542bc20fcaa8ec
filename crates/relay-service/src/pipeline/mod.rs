//! The idempotent event-processing core
//!
//! Components, leaf-first: normalizer, reaction gate, message resolver,
//! ticket synthesizer, notifier, and the pipeline that composes them.

mod event_pipeline;
mod gate;
mod normalizer;
mod notifier;
mod outcome;
mod resolver;
mod synthesizer;

#[cfg(test)]
mod testing;

pub use event_pipeline::EventPipeline;
pub use gate::ReactionGate;
pub use normalizer::{normalize, InboundPayload};
pub use notifier::{notification_text, Notifier};
pub use outcome::{DropReason, IgnoreReason, PipelineOutcome};
pub use resolver::MessageResolver;
pub use synthesizer::{summary_for, TicketSynthesizer};
