//! Health check and metrics endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (checks the database)
//! - /health/live - Liveness probe (always OK while the server runs)
//! - /metrics - Prometheus exposition

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn response(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(response("healthy", None))
}

/// Readiness probe, 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(_) => CheckStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    };

    if database.status == "healthy" {
        Ok(Json(response("ready", Some(HealthChecks { database }))))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(response("not_ready", Some(HealthChecks { database }))),
        ))
    }
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(response("alive", None))
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(StatusCode::NOT_FOUND)
}
