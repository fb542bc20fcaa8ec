//! # relay-common
//!
//! Shared utilities including configuration, error handling, request signatures, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{RequestVerifier, SlackSignatureVerifier};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, DedupBackend, Environment, JiraConfig,
    PipelineConfig, RoutingConfig, ServerConfig, SlackConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
