#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Fresh pooled connection for the current test's runtime, or `None` when the
/// run has no database (`SKIP_DB_TESTS` set or `DATABASE_URL` missing).
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }

    // Run migrations exactly once, with a throwaway connection
    let migrated = MIGRATED
        .get_or_init(|| async {
            match models::db::connect().await {
                Ok(db) => {
                    let ok = models::db::run_migrations(&db).await.is_ok();
                    let _ = models::db::close(db).await;
                    ok
                }
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !*migrated {
        return Ok(None);
    }

    let db = models::db::connect().await?;
    Ok(Some(db))
}
