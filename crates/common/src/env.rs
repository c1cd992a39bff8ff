//! Environment/runtime helpers
//!
//! Startup summary of the variables that decide whether the service can run.
//! Values that may carry credentials are reported only as present/absent.

use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSummary {
    pub port: Option<String>,
    pub app_env: Option<String>,
    pub database_url_present: bool,
}

impl EnvSummary {
    pub fn collect() -> Self {
        Self::collect_with(|key| std::env::var(key).ok())
    }

    pub fn collect_with<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            port: lookup("PORT").or_else(|| lookup("SERVER_PORT")),
            app_env: lookup("APP_ENV"),
            database_url_present: lookup("DATABASE_URL").is_some_and(|v| !v.trim().is_empty()),
        }
    }

    pub fn log(&self) {
        info!(
            event = "env_check",
            port = self.port.as_deref().unwrap_or("(not set)"),
            app_env = self.app_env.as_deref().unwrap_or("(not set)"),
            database_url_present = self.database_url_present,
            "environment check"
        );
        if !self.database_url_present {
            warn!(event = "env_check", "DATABASE_URL not set in environment; relying on config file");
        }
    }
}
