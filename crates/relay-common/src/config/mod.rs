//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, DedupBackend, Environment, JiraConfig,
    PipelineConfig, RoutingConfig, ServerConfig, SlackConfig,
};
