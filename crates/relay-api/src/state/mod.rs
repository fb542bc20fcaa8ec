//! Application state
//!
//! Holds the shared state for the Axum application: the service context the
//! pipeline runs against and the verifier guarding the webhook.

use std::sync::Arc;

use relay_common::RequestVerifier;
use relay_db::PgPool;
use relay_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all pipeline dependencies
    service_context: Arc<ServiceContext>,
    /// Inbound request authenticity check
    verifier: Arc<dyn RequestVerifier>,
    /// Backing pool, when the dedup store is Postgres
    pool: Option<PgPool>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, verifier: Arc<dyn RequestVerifier>) -> Self {
        Self {
            service_context: Arc::new(service_context),
            verifier,
            pool: None,
        }
    }

    /// Attach the database pool so it can be closed on shutdown
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context, for work that outlives a request
    pub fn shared_context(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    /// Get the request verifier
    pub fn verifier(&self) -> &dyn RequestVerifier {
        self.verifier.as_ref()
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("verifier", &"RequestVerifier")
            .field("pool", &self.pool.is_some())
            .finish()
    }
}
