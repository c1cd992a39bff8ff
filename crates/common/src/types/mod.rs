use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmation body for mutations without an entity to return, e.g. delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `GET /` payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppReport {
    pub port: u16,
    pub env: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DatabaseReport {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /health` payload. A degraded store still yields 200; callers read `status`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub app: AppReport,
    pub database: DatabaseReport,
}

impl HealthReport {
    pub fn healthy(app: AppReport, time: DateTime<Utc>, version: String) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            app,
            database: DatabaseReport { connected: true, time: Some(time), version: Some(version), error: None },
        }
    }

    pub fn degraded(app: AppReport, error: String) -> Self {
        Self {
            status: HealthStatus::Degraded,
            timestamp: Utc::now(),
            app,
            database: DatabaseReport { connected: false, error: Some(error), ..Default::default() },
        }
    }
}
