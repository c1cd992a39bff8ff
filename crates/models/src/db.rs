use chrono::{DateTime, Utc};
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ConnectOptions, ConnectionTrait, Database, DatabaseBackend,
    DatabaseConnection, DbErr, Statement,
};
use tracing::info;

use crate::errors::ModelError;

/// Build the connection pool from validated settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout())
        .acquire_timeout(cfg.acquire_timeout())
        .idle_timeout(cfg.idle_timeout())
        .max_lifetime(cfg.max_lifetime())
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(
        event = "db_pool_ready",
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "database pool created"
    );
    Ok(db)
}

/// Connect using defaults plus `DATABASE_URL` (loads `.env` if present).
pub async fn connect() -> Result<DatabaseConnection, ModelError> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| ModelError::Config("DATABASE_URL must be set".into()))?;
    let cfg = DatabaseConfig { url, ..Default::default() };
    cfg.validate().map_err(|e| ModelError::Config(e.to_string()))?;
    connect_with_config(&cfg).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), ModelError> {
    migration::Migrator::up(db, None).await?;
    info!(event = "migrations_applied", "database schema up to date");
    Ok(())
}

/// What the store reports about itself when probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub time: DateTime<Utc>,
    pub version: String,
}

pub async fn ping(db: &DatabaseConnection) -> Result<StoreStatus, DbErr> {
    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT NOW() AS time, version() AS version",
    );
    let row = db
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("store probe returned no row".into()))?;
    let time: DateTimeWithTimeZone = row.try_get("", "time")?;
    let version: String = row.try_get("", "version")?;
    Ok(StoreStatus { time: time.with_timezone(&Utc), version })
}

/// Drain and close the pool; used once at shutdown.
pub async fn close(db: DatabaseConnection) -> Result<(), ModelError> {
    db.close().await?;
    info!(event = "db_pool_closed", "database pool closed");
    Ok(())
}
