//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support) and
//! the optional channel routing file.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use relay_core::{RouteOverride, RoutingTable, TicketRoute};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub slack: SlackConfig,
    pub jira: JiraConfig,
    pub pipeline: PipelineConfig,
    pub routing: RoutingConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which dedup store backs the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupBackend {
    #[default]
    Postgres,
    /// Process-local set, lost on restart
    Memory,
}

impl DedupBackend {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Dedup store configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DedupBackend,
    /// Required when `backend` is `Postgres`
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Chat platform configuration
#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub signing_secret: String,
    pub bot_token: String,
    pub api_base: String,
    pub workspace_url: String,
    pub signature_max_age_secs: i64,
}

/// Ticketing platform configuration
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
    pub issue_type: String,
    pub sprint_field: String,
}

/// Event pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub trigger_reaction: String,
    /// Upper bound on every outbound chat/ticketing call
    pub outbound_timeout_ms: u64,
}

impl PipelineConfig {
    #[must_use]
    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_millis(self.outbound_timeout_ms.max(1))
    }
}

/// Channel routing configuration
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub routes_file: Option<String>,
    pub default_route: TicketRoute,
}

/// On-disk shape of the routing file
#[derive(Debug, Deserialize)]
struct RoutesFile {
    #[serde(default)]
    default: Option<TicketRoute>,
    #[serde(default)]
    channels: HashMap<String, RouteOverride>,
}

impl RoutingConfig {
    /// Build the routing table, reading the routing file if one is configured
    pub fn load_table(&self) -> Result<RoutingTable, ConfigError> {
        match &self.routes_file {
            Some(path) => load_routes_file(Path::new(path), &self.default_route),
            None => Ok(RoutingTable::with_default(self.default_route.clone())),
        }
    }
}

fn load_routes_file(path: &Path, fallback: &TicketRoute) -> Result<RoutingTable, ConfigError> {
    let file: RoutesFile = ::config::Config::builder()
        .add_source(::config::File::from(path))
        .build()
        .and_then(::config::Config::try_deserialize)
        .map_err(|e| ConfigError::RoutesFile(format!("{}: {e}", path.display())))?;

    // Channel ids are upper-case; the file loader may fold key case.
    let channels = file
        .channels
        .into_iter()
        .map(|(channel, entry)| (channel.to_ascii_uppercase(), entry))
        .collect();

    Ok(RoutingTable::new(
        file.default.unwrap_or_else(|| fallback.clone()),
        channels,
    ))
}

// Default value functions
fn default_app_name() -> String {
    "reaction-relay".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_slack_api_base() -> String {
    "https://slack.com/api".to_string()
}

fn default_signature_max_age() -> i64 {
    300 // 5 minutes
}

fn default_issue_type() -> String {
    "Task".to_string()
}

fn default_sprint_field() -> String {
    "customfield_10020".to_string()
}

fn default_trigger_reaction() -> String {
    "engineer".to_string()
}

fn default_outbound_timeout_ms() -> u64 {
    10_000
}

fn default_route() -> TicketRoute {
    TicketRoute::new("TPM", "TPM-36", "45")
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            var(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let backend = match var("DEDUP_STORE") {
            Some(raw) => DedupBackend::parse(&raw)
                .ok_or(ConfigError::InvalidValue("DEDUP_STORE", raw))?,
            None => DedupBackend::default(),
        };
        let database_url = match backend {
            DedupBackend::Postgres => Some(required("DATABASE_URL")?),
            DedupBackend::Memory => var("DATABASE_URL"),
        };

        let fallback = default_route();

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(default_host),
                port: match var("SERVER_PORT") {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", raw))?,
                    None => default_port(),
                },
            },
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: var("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            slack: SlackConfig {
                signing_secret: required("SLACK_SIGNING_SECRET")?,
                bot_token: required("SLACK_BOT_TOKEN")?,
                api_base: var("SLACK_API_BASE").unwrap_or_else(default_slack_api_base),
                workspace_url: required("SLACK_WORKSPACE_URL")?,
                signature_max_age_secs: var("SLACK_SIGNATURE_MAX_AGE_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_signature_max_age),
            },
            jira: JiraConfig {
                base_url: required("JIRA_URL")?,
                username: required("JIRA_USERNAME")?,
                api_token: required("JIRA_API_TOKEN")?,
                issue_type: var("JIRA_ISSUE_TYPE").unwrap_or_else(default_issue_type),
                sprint_field: var("JIRA_SPRINT_FIELD").unwrap_or_else(default_sprint_field),
            },
            pipeline: PipelineConfig {
                trigger_reaction: var("TRIGGER_REACTION")
                    .map(|s| s.trim().trim_matches(':').to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_trigger_reaction),
                outbound_timeout_ms: var("OUTBOUND_TIMEOUT_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_outbound_timeout_ms),
            },
            routing: RoutingConfig {
                routes_file: var("ROUTES_FILE").filter(|s| !s.trim().is_empty()),
                default_route: TicketRoute {
                    project_key: var("DEFAULT_PROJECT_KEY").unwrap_or(fallback.project_key),
                    epic_key: var("DEFAULT_EPIC_KEY").unwrap_or(fallback.epic_key),
                    board_id: var("DEFAULT_BOARD_ID").unwrap_or(fallback.board_id),
                },
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid routes file {0}")]
    RoutesFile(String),
}
