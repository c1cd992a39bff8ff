use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use models::db::StoreStatus;
use tracing::{error, info, instrument, warn};

use super::domain::{Customer, CustomerInput};
use super::repository::{memory::InMemoryCustomerRepository, CustomerRepository};
use crate::errors::ServiceError;
use crate::observability;

/// Customer business service independent of web framework.
///
/// Validates input before the gateway is touched and bounds every gateway call
/// by `store_timeout`; an elapsed call is reported as `StoreUnavailable`.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    store_timeout: Duration,
}

impl CustomerService {
    pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(repo: Arc<dyn CustomerRepository>, store_timeout: Duration) -> Self {
        Self { repo, store_timeout }
    }

    /// Service over a fresh in-memory gateway.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCustomerRepository::new()), Self::DEFAULT_STORE_TIMEOUT)
    }

    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        let timer = observability::STORE_CALL_DURATION
            .with_label_values(&[operation])
            .start_timer();
        let res = match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(ServiceError::StoreUnavailable(format!(
                "{operation} timed out after {}ms",
                self.store_timeout.as_millis()
            ))),
        };
        timer.observe_duration();
        observability::record_outcome(operation, &res);
        if let Err(ServiceError::StoreUnavailable(detail)) = &res {
            error!(operation, %detail, "store call failed");
        }
        res
    }

    /// List every customer, ascending by id.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, CustomerInput};
    /// let svc = CustomerService::in_memory();
    /// tokio_test::block_on(svc.create(CustomerInput::new("Amit", "amit@example.com"))).unwrap();
    /// let all = tokio_test::block_on(svc.list()).unwrap();
    /// assert_eq!(all.len(), 1);
    /// assert_eq!(all[0].name, "Amit");
    /// ```
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.call("list", self.repo.list()).await
    }

    /// Create a customer; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::{customer::{CustomerService, CustomerInput}, errors::ServiceError};
    /// let svc = CustomerService::in_memory();
    /// let first = tokio_test::block_on(svc.create(CustomerInput::new("A", "a@x.com")));
    /// assert!(first.is_ok());
    /// let second = tokio_test::block_on(svc.create(CustomerInput::new("A", "a@x.com")));
    /// assert_eq!(second.unwrap_err(), ServiceError::DuplicateEmail);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CustomerInput) -> Result<Customer, ServiceError> {
        let new = input.validate()?;
        match self.call("create", self.repo.create(&new.name, &new.email)).await {
            Ok(c) => {
                info!(id = c.id, email = %c.email, "customer_created");
                Ok(c)
            }
            Err(ServiceError::DuplicateEmail) => {
                warn!(email = %new.email, "email already exists");
                Err(ServiceError::DuplicateEmail)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace name and email of an existing customer.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: CustomerInput) -> Result<Customer, ServiceError> {
        let new = input.validate()?;
        let c = self.call("update", self.repo.update(id, &new.name, &new.email)).await?;
        info!(id = c.id, email = %c.email, "customer_updated");
        Ok(c)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.call("delete", self.repo.delete(id)).await?;
        info!(id, "customer_deleted");
        Ok(())
    }

    /// Store probe for health reporting.
    pub async fn ping(&self) -> Result<StoreStatus, ServiceError> {
        self.call("ping", self.repo.ping()).await
    }
}
