use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use common::types::MessageResponse;
use service::customer::{domain::REQUIRED_FIELDS_MESSAGE, Customer, CustomerInput};
use tracing::{info, warn};

use crate::{errors::JsonApiError, routes::ServerState};

fn body_or_400(payload: Result<Json<CustomerInput>, JsonRejection>) -> Result<CustomerInput, JsonApiError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rej) => {
            warn!(reason = %rej.body_text(), "rejected customer payload");
            Err(JsonApiError::bad_request(REQUIRED_FIELDS_MESSAGE, Some(rej.body_text())))
        }
    }
}

fn id_or_400(id: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    id.map(|Path(id)| id)
        .map_err(|rej| JsonApiError::bad_request("Invalid customer id", Some(rej.body_text())))
}

#[utoipa::path(
    get, path = "/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers ascending by id", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Failed to fetch customers", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let list = state
        .customers
        .list()
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to fetch customers"))?;
    info!(count = list.len(), "list customers");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/customers", tag = "customers",
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Name and email are required", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already exists", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to add customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), JsonApiError> {
    let input = body_or_400(payload)?;
    let created = state
        .customers
        .create(input)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to add customer"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Invalid id or missing fields", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Customer not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already exists", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to update customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, JsonApiError> {
    let id = id_or_400(id)?;
    let input = body_or_400(payload)?;
    let updated = state
        .customers
        .update(id, input)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to update customer"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid customer id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Customer not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to delete customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let id = id_or_400(id)?;
    state
        .customers
        .delete(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to delete customer"))?;
    Ok(Json(MessageResponse::new("Customer deleted")))
}
