use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "customer-portal", event = "logger_init", "tracing subscriber initialized");
}

/// Worker threads: TOKIO_WORKER_THREADS over config.toml; 0 or unset lets Tokio decide.
fn worker_threads() -> Option<usize> {
    configs::load_default()
        .map(|cfg| cfg.server)
        .unwrap_or_default()
        .effective_worker_threads(|key| std::env::var(key).ok())
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "customer-portal",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "customer-portal", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "customer-portal",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "customer portal starting"
    );

    // graceful shutdown is handled inside server::run
    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(service = "customer-portal", event = "stop", %service_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "customer-portal", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
