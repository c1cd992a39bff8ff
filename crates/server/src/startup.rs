use std::sync::Arc;

use axum::Router;
use common::{env::EnvSummary, types::AppReport, utils::logging::init_logging_from_env};
use configs::AppConfig;
use dotenvy::dotenv;
use service::customer::{repo::seaorm::SeaOrmCustomerRepository, CustomerService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(event = "shutdown_signal", signal = "sigterm", "shutting down"),
    }
}

/// Application router over an arbitrary customer service; used by `run` and by tests.
pub fn build_app(customers: CustomerService, app: AppReport) -> Router {
    routes::build_router(ServerState::new(customers, app), build_cors())
}

/// Public entry: load config, connect the pool, serve until a shutdown signal, then close the pool.
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    init_logging_from_env();
    EnvSummary::collect().log();

    let cfg = AppConfig::load_and_validate()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        models::db::run_migrations(&db).await?;
    }

    let repo = Arc::new(SeaOrmCustomerRepository::new(db.clone()));
    let customers = CustomerService::new(repo, cfg.database.statement_timeout());
    let app = build_app(customers, AppReport { port: cfg.server.port, env: cfg.app.env.clone() });

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, env = %cfg.app.env, "customer portal api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    models::db::close(db).await?;
    Ok(())
}
