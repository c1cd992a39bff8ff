use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and email are required";

/// Customer as exposed to callers. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email }
    }
}

/// Create/update payload as received. Both fields are optional on the wire so
/// that a missing field is a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: Some(name.into()), email: Some(email.into()) }
    }

    /// Blank strings count as missing. Accepted values are kept verbatim.
    pub fn validate(self) -> Result<NewCustomer, ServiceError> {
        match (present(self.name), present(self.email)) {
            (Some(name), Some(email)) => Ok(NewCustomer { name, email }),
            _ => Err(ServiceError::InvalidInput(REQUIRED_FIELDS_MESSAGE.into())),
        }
    }
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Validated name/email pair, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}
