use async_trait::async_trait;
use models::db::StoreStatus;

use super::domain::Customer;
use crate::errors::ServiceError;

/// Persistence gateway for customer records.
///
/// Implementations translate store failures into `ServiceError`: unique email
/// violations become `DuplicateEmail`, missing ids become `NotFound`, anything
/// infrastructural becomes `StoreUnavailable`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ascending by id.
    async fn list(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn create(&self, name: &str, email: &str) -> Result<Customer, ServiceError>;
    /// Full replace of name and email.
    async fn update(&self, id: i32, name: &str, email: &str) -> Result<Customer, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    /// Store liveness probe.
    async fn ping(&self) -> Result<StoreStatus, ServiceError>;
}

/// In-memory repository for tests and database-less local runs
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Customer>, // key: id
        last_id: i32,
    }

    impl State {
        fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
            self.rows.values().any(|c| c.email == email && Some(c.id) != except)
        }
    }

    /// Ids are never reused, matching a `SERIAL` column.
    #[derive(Default)]
    pub struct InMemoryCustomerRepository {
        state: RwLock<State>,
    }

    impl InMemoryCustomerRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl CustomerRepository for InMemoryCustomerRepository {
        async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
            let state = self.state.read().await;
            Ok(state.rows.values().cloned().collect())
        }

        async fn create(&self, name: &str, email: &str) -> Result<Customer, ServiceError> {
            let mut state = self.state.write().await;
            if state.email_taken(email, None) {
                return Err(ServiceError::DuplicateEmail);
            }
            state.last_id += 1;
            let c = Customer { id: state.last_id, name: name.to_string(), email: email.to_string() };
            state.rows.insert(c.id, c.clone());
            Ok(c)
        }

        async fn update(&self, id: i32, name: &str, email: &str) -> Result<Customer, ServiceError> {
            let mut state = self.state.write().await;
            if !state.rows.contains_key(&id) {
                return Err(ServiceError::not_found("customer"));
            }
            if state.email_taken(email, Some(id)) {
                return Err(ServiceError::DuplicateEmail);
            }
            let c = Customer { id, name: name.to_string(), email: email.to_string() };
            state.rows.insert(id, c.clone());
            Ok(c)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut state = self.state.write().await;
            state.rows.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("customer"))
        }

        async fn ping(&self) -> Result<StoreStatus, ServiceError> {
            Ok(StoreStatus { time: chrono::Utc::now(), version: "in-memory".into() })
        }
    }
}
