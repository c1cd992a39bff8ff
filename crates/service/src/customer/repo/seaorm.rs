use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::warn;

use models::{customer, db::StoreStatus};

use crate::customer::domain::Customer;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

/// PostgreSQL-backed gateway over the pooled connection.
#[derive(Clone)]
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Reduce a driver error to the service taxonomy.
fn classify(err: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        warn!(%detail, "unique constraint violation");
        return ServiceError::DuplicateEmail;
    }
    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ServiceError::not_found("customer"),
        other => ServiceError::StoreUnavailable(other.to_string()),
    }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::list_all(&self.db).await.map_err(classify)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, name: &str, email: &str) -> Result<Customer, ServiceError> {
        let created = customer::insert(&self.db, name, email).await.map_err(classify)?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, name: &str, email: &str) -> Result<Customer, ServiceError> {
        let updated = customer::replace(&self.db, id, name, email).await.map_err(classify)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        match customer::delete(&self.db, id).await.map_err(classify)? {
            0 => Err(ServiceError::not_found("customer")),
            _ => Ok(()),
        }
    }

    async fn ping(&self) -> Result<StoreStatus, ServiceError> {
        models::db::ping(&self.db)
            .await
            .map_err(|e| ServiceError::StoreUnavailable(e.to_string()))
    }
}
