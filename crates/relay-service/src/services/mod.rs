//! Service wiring
//!
//! The dependency container shared by the pipeline components and the
//! service-level error type.

pub mod context;
pub mod error;

pub use context::{
    PipelineSettings, ServiceContext, ServiceContextBuilder, DEFAULT_ISSUE_TYPE,
    DEFAULT_TRIGGER_REACTION,
};
pub use error::{ServiceError, ServiceResult};
