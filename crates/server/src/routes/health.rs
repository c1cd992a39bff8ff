use axum::{extract::State, Json};
use chrono::Utc;
use common::types::{HealthReport, ServiceInfo};
use tracing::warn;

use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Service banner", body = crate::openapi::ServiceInfoDoc))
)]
pub async fn root(State(state): State<ServerState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Customer Engagement Portal API".to_string(),
        status: "online".to_string(),
        timestamp: Utc::now(),
        port: state.app.port,
    })
}

/// Always 200; an unreachable store is reported as `degraded`.
#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Health report", body = crate::openapi::HealthDoc))
)]
pub async fn health(State(state): State<ServerState>) -> Json<HealthReport> {
    let report = match state.customers.ping().await {
        Ok(s) => HealthReport::healthy(state.app.clone(), s.time, s.version),
        Err(e) => {
            warn!(error = %e, "health check: store unreachable");
            HealthReport::degraded(state.app.clone(), e.to_string())
        }
    };
    Json(report)
}
