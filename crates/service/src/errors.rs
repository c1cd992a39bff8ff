use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("email already exists")]
    DuplicateEmail,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::DuplicateEmail => "duplicate_email",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}
