use axum::{
    http::header,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::AppReport;
use service::customer::CustomerService;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod customers;
pub mod health;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub customers: CustomerService,
    pub app: AppReport,
}

impl ServerState {
    pub fn new(customers: CustomerService, app: AppReport) -> Self {
        Self { customers, app }
    }
}

/// Prometheus text exposition of the default registry.
pub async fn metrics() -> Result<impl IntoResponse, JsonApiError> {
    let body = service::observability::gather_text().map_err(|e| {
        JsonApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to gather metrics",
            Some(e.to_string()),
        )
    })?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let customer_routes = Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route("/customers/:id", put(customers::update).delete(customers::delete));

    let ops = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    ops.merge(customer_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
