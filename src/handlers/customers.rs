use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::customer;
use crate::errors::ServiceError;
use crate::services::customers::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListQuery {
    pub shop_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses((status = 201, description = "Customer created")),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<customer::Model>), ServiceError> {
    let created = state.services.customers.create_customer(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/customers",
    params(CustomerListQuery),
    responses((status = 200, description = "Customers for the shop")),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<Vec<customer::Model>>, ServiceError> {
    let customers = state
        .services
        .customers
        .list_customers_by_shop(query.shop_id)
        .await?;
    Ok(Json(customers))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    responses(
        (status = 200, description = "Customer"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<customer::Model>, ServiceError> {
    let found = state.services.customers.get_customer(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    patch,
    path = "/customers/{id}",
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<customer::Model>, ServiceError> {
    let updated = state.services.customers.update_customer(id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    responses(
        (status = 204, description = "Customer soft deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
