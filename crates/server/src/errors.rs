use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"message": ..., "error"?: ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail }
    }

    pub fn bad_request(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, detail)
    }

    /// Map a service failure; `failure` is the message used when the store is unavailable.
    pub fn from_service(err: ServiceError, failure: &str) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::bad_request(msg, None),
            ServiceError::DuplicateEmail => Self::new(StatusCode::CONFLICT, "Email already exists", None),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Customer not found", None),
            ServiceError::StoreUnavailable(detail) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure, Some(detail))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, detail = ?self.detail, "request failed");
        }
        let body = ErrorBody { message: &self.message, error: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    InvalidConfig(#[from] configs::ConfigError),
    #[error("database initialization failed: {0}")]
    Database(#[from] models::errors::ModelError),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::InvalidInput("Name and email are required".into()), StatusCode::BAD_REQUEST),
            (ServiceError::DuplicateEmail, StatusCode::CONFLICT),
            (ServiceError::not_found("customer"), StatusCode::NOT_FOUND),
            (ServiceError::StoreUnavailable("pool timed out".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from_service(err, "Failed").status, status);
        }
    }

    #[test]
    fn config_errors_are_reported_once() {
        let err = StartupError::from(configs::ConfigError::Invalid("DATABASE_URL is not set".into()));
        assert_eq!(err.to_string(), "invalid configuration: DATABASE_URL is not set");
    }

    #[test]
    fn store_failures_carry_operation_message_and_detail() {
        let e = JsonApiError::from_service(ServiceError::StoreUnavailable("boom".into()), "Failed to add customer");
        assert_eq!(e.message, "Failed to add customer");
        assert_eq!(e.detail.as_deref(), Some("boom"));
    }
}
