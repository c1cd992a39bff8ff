//! Shared building blocks for the customer portal crates: response types,
//! logging setup and environment inspection.

pub mod types;
pub mod utils;
pub mod env;
