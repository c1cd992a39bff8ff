//! Service layer for customer records.
//! - `customer::repository` is the persistence gateway (PostgreSQL or in-memory).
//! - `customer::service` validates input and bounds every store call in time.
//! - Errors are reduced to the `ServiceError` taxonomy before reaching HTTP.

pub mod errors;
pub mod customer;
pub mod observability;
#[cfg(test)]
pub mod test_support;
