//! Reaction relay server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p relay-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use relay_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    let environment = config
        .as_ref()
        .map(|c| c.app.env)
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(environment)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        dedup_store = ?config.database.backend,
        trigger = %config.pipeline.trigger_reaction,
        "Configuration loaded"
    );

    if let Err(e) = relay_api::run(config).await {
        error!(error = %e, code = e.error_code(), "Server failed");
        std::process::exit(1);
    }
}
