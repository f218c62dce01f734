//! Application state management
//!
//! Shared resources passed to every handler via Axum's state extraction.
//! All fields are cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token codec with pre-computed keys
    pub jwt: JwtService,
    /// Prometheus renderer, absent when no recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret; call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.expiry_secs);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            metrics: None,
        }
    }

    /// Attach the process-wide Prometheus handle
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
