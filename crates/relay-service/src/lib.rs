//! # relay-service
//!
//! Application layer: the idempotent event pipeline, its service context,
//! and the response DTOs.

pub mod dto;
pub mod pipeline;
pub mod services;

pub use pipeline::{EventPipeline, PipelineOutcome};
pub use services::{
    PipelineSettings, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
