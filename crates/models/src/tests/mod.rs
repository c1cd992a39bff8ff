use sea_orm::DatabaseConnection;



/// Migrated connection, or `None` when no database is configured for this run.
pub(crate) async fn test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: SKIP_DB_TESTS set or DATABASE_URL missing");
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    crate::db::run_migrations(&db).await?;
    Ok(Some(db))
}
