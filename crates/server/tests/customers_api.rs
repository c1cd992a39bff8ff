use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::types::AppReport;
use models::db::StoreStatus;
use serde_json::{json, Value};
use service::{
    customer::{Customer, CustomerRepository, CustomerService},
    errors::ServiceError,
};
use tower::ServiceExt;

fn app_report() -> AppReport {
    AppReport { port: 3000, env: "test".into() }
}

fn app() -> Router {
    server::startup::build_app(CustomerService::in_memory(), app_report())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Store that is always down.
struct DownRepository;

#[async_trait]
impl CustomerRepository for DownRepository {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Err(ServiceError::StoreUnavailable("connection refused".into()))
    }
    async fn create(&self, _: &str, _: &str) -> Result<Customer, ServiceError> {
        Err(ServiceError::StoreUnavailable("connection refused".into()))
    }
    async fn update(&self, _: i32, _: &str, _: &str) -> Result<Customer, ServiceError> {
        Err(ServiceError::StoreUnavailable("connection refused".into()))
    }
    async fn delete(&self, _: i32) -> Result<(), ServiceError> {
        Err(ServiceError::StoreUnavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<StoreStatus, ServiceError> {
        Err(ServiceError::StoreUnavailable("connection refused".into()))
    }
}

fn down_app() -> Router {
    let svc = CustomerService::new(Arc::new(DownRepository), Duration::from_secs(1));
    server::startup::build_app(svc, app_report())
}

#[tokio::test]
async fn create_then_list() {
    let app = app();
    let (status, created) =
        send(&app, "POST", "/customers", Some(json!({"name": "Amit", "email": "amit@example.com"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Amit");
    assert!(created["id"].as_i64().is_some());

    let (status, list) = send(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn missing_fields_are_400() {
    let app = app();
    let (status, body) = send(&app, "POST", "/customers", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name and email are required");

    let (status, _) = send(&app, "POST", "/customers", Some(json!({"name": "  ", "email": "x@y.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // no body at all
    let (status, body) = send(&app, "POST", "/customers", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name and email are required");

    let (_, list) = send(&app, "GET", "/customers", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let app = app();
    let payload = json!({"name": "A", "email": "a@x.com"});
    let (status, _) = send(&app, "POST", "/customers", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/customers", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let (_, created) = send(&app, "POST", "/customers", Some(json!({"name": "A", "email": "a@x.com"}))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) =
        send(&app, "PUT", &format!("/customers/{id}"), Some(json!({"name": "B", "email": "b@x.com"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "name": "B", "email": "b@x.com"}));
}

#[tokio::test]
async fn update_with_missing_fields_is_400_and_keeps_row() {
    let app = app();
    let (_, created) = send(&app, "POST", "/customers", Some(json!({"name": "A", "email": "a@x.com"}))).await;
    let uri = format!("/customers/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name and email are required");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"name": "", "email": "b@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/customers", None).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn update_onto_taken_email_is_409() {
    let app = app();
    let (_, a) = send(&app, "POST", "/customers", Some(json!({"name": "A", "email": "a@x.com"}))).await;
    send(&app, "POST", "/customers", Some(json!({"name": "B", "email": "b@x.com"}))).await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/customers/{}", a["id"]),
        Some(json!({"name": "A", "email": "b@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_ids_are_404() {
    let app = app();
    let (status, body) = send(&app, "PUT", "/customers/999", Some(json!({"name": "X", "email": "x@x.com"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found");

    let (status, body) = send(&app, "DELETE", "/customers/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/customers/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid customer id");

    let (status, _) = send(&app, "PUT", "/customers/abc", Some(json!({"name": "X", "email": "x@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_customer() {
    let app = app();
    let (_, created) = send(&app, "POST", "/customers", Some(json!({"name": "A", "email": "a@x.com"}))).await;
    let uri = format!("/customers/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Customer deleted"}));

    let (_, list) = send(&app, "GET", "/customers", None).await;
    assert_eq!(list, json!([]));
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_outage_is_500_with_detail() {
    let app = down_app();
    let (status, body) = send(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch customers");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    let (status, body) = send(&app, "POST", "/customers", Some(json!({"name": "A", "email": "a@x.com"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to add customer");

    // validation still wins over the outage
    let (status, _) = send(&app, "POST", "/customers", Some(json!({"name": "A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_reports_online() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer Engagement Portal API");
    assert_eq!(body["status"], "online");
    assert_eq!(body["port"], 3000);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_is_healthy_with_store() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    assert_eq!(body["app"]["env"], "test");
}

#[tokio::test]
async fn health_is_degraded_but_200_without_store() {
    let (status, body) = send(&down_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"]["connected"], false);
    assert!(body["database"]["error"].is_string());
}

#[tokio::test]
async fn metrics_expose_store_calls() {
    let app = app();
    send(&app, "GET", "/customers", None).await;
    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("customer_portal_store_calls_total"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/customers"].is_object());
    assert!(body["paths"]["/customers/{id}"]["delete"].is_object());
}
