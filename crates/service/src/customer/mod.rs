//! Customer records: domain types, the persistence gateway and the service on top.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Customer, CustomerInput, NewCustomer};
pub use repository::CustomerRepository;
pub use service::CustomerService;
