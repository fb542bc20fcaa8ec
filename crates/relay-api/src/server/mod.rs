//! Server setup and initialization
//!
//! Provides the application builder, dependency wiring and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use relay_common::{
    AppConfig, AppError, AppResult, ConfigError, DatabaseConfig, DedupBackend, RequestVerifier,
    SlackSignatureVerifier,
};
use relay_core::DedupStore;
use relay_db::{create_pool, MemoryDedupStore, PgDedupStore, PgPool, PoolConfig};
use relay_platform::{JiraClient, SlackClient};
use relay_service::{PipelineSettings, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Open the configured dedup store
///
/// Returns the pool alongside the store when the backend is Postgres so the
/// caller can close it on shutdown.
async fn create_dedup_store(
    config: &DatabaseConfig,
) -> AppResult<(Arc<dyn DedupStore>, Option<PgPool>)> {
    match config.backend {
        DedupBackend::Postgres => {
            let pool_config = PoolConfig::from_settings(config)
                .ok_or(AppError::Config(ConfigError::MissingVar("DATABASE_URL")))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&pool_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let store = PgDedupStore::new(pool.clone());
            store
                .ensure_schema()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            Ok((Arc::new(store), Some(pool)))
        }
        DedupBackend::Memory => {
            warn!("Using in-memory dedup store; processed events are forgotten on restart");
            Ok((Arc::new(MemoryDedupStore::new()), None))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> AppResult<AppState> {
    let (dedup_store, pool) = create_dedup_store(&config.database).await?;

    let timeout = config.pipeline.outbound_timeout();

    let chat = SlackClient::new(&config.slack.api_base, &config.slack.bot_token, timeout)
        .map_err(AppError::internal)?;

    let ticketing = JiraClient::new(
        &config.jira.base_url,
        &config.jira.username,
        &config.jira.api_token,
        timeout,
    )
    .map_err(AppError::internal)?
    .with_sprint_field(&config.jira.sprint_field);

    let routing = config.routing.load_table()?;
    info!(overrides = routing.len(), "Routing table loaded");

    let settings = PipelineSettings::new(&config.slack.workspace_url)
        .with_trigger_reaction(&config.pipeline.trigger_reaction)
        .with_issue_type(&config.jira.issue_type);

    let service_context = ServiceContextBuilder::new()
        .dedup_store(dedup_store)
        .chat(Arc::new(chat))
        .ticketing(Arc::new(ticketing))
        .routing(routing)
        .settings(settings)
        .build()?;

    let verifier: Arc<dyn RequestVerifier> = Arc::new(SlackSignatureVerifier::new(
        &config.slack.signing_secret,
        config.slack.signature_max_age_secs,
    ));

    let state = AppState::new(service_context, verifier);
    Ok(match pool {
        Some(pool) => state.with_pool(pool),
        None => state,
    })
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config.server.address().parse().map_err(|_| {
        AppError::Config(ConfigError::InvalidValue(
            "SERVER_HOST",
            config.server.host.clone(),
        ))
    })?;

    let state = create_app_state(&config).await?;
    let pool = state.pool().cloned();

    let app = create_app(state);
    let result = run_server(app, addr).await;

    if let Some(pool) = pool {
        info!("Closing database pool");
        pool.close().await;
    }

    info!("Server stopped");
    result
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
