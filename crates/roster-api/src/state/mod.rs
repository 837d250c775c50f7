//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and database handle.

use std::sync::Arc;

use roster_common::AppConfig;
use roster_db::Database;
use roster_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Pool handle, used directly only by the readiness probe
    db: Database,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig, db: Database) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            db,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the database handle
    pub fn db(&self) -> &Database {
        &self.db
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
