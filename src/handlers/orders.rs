use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::order;
use crate::errors::ServiceError;
use crate::services::orders::{
    AssignOrderRequest, CreateOrderRequest, OrderDetailsResponse, UpdateOrderRequest,
    UpdateOrderStatusRequest,
};
use crate::services::outfits::OutfitType;
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub shop_id: Option<Uuid>,
    pub status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with children", body = OrderDetailsResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderDetailsResponse>), ServiceError> {
    let created = state.services.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/orders",
    params(OrderListQuery),
    responses((status = 200, description = "Orders, newest first")),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<order::Model>>, ServiceError> {
    let orders = state
        .services
        .orders
        .list_orders(query.shop_id, query.status)
        .await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    responses(
        (status = 200, description = "Order with clothes, measurements, costs and customer", body = OrderDetailsResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetailsResponse>, ServiceError> {
    let details = state.services.orders.get_order_details(id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}",
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderDetailsResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderDetailsResponse>, ServiceError> {
    let updated = state.services.orders.update_order(id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/orders/assigned/{tailorId}",
    responses((status = 200, description = "Orders assigned to the tailor")),
    tag = "orders"
)]
pub async fn list_assigned_orders(
    State(state): State<AppState>,
    Path(tailor_id): Path<Uuid>,
) -> Result<Json<Vec<order::Model>>, ServiceError> {
    let orders = state.services.orders.list_orders_by_tailor(tailor_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/assign",
    request_body = AssignOrderRequest,
    responses(
        (status = 200, description = "Order assigned"),
        (status = 404, description = "Order or tailor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn assign_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignOrderRequest>,
) -> Result<Json<order::Model>, ServiceError> {
    let updated = state.services.orders.assign_order(id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/unassign",
    responses((status = 200, description = "Order unassigned")),
    tag = "orders"
)]
pub async fn unassign_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<order::Model>, ServiceError> {
    let updated = state.services.orders.unassign_order(id).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<order::Model>, ServiceError> {
    let updated = state
        .services
        .orders
        .update_order_status(id, payload)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    responses(
        (status = 204, description = "Order soft deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/orders/outfits/all",
    responses((status = 200, description = "Full garment catalog")),
    tag = "outfits"
)]
pub async fn list_outfits(State(state): State<AppState>) -> Json<Vec<OutfitType>> {
    Json(state.services.outfits.all().to_vec())
}

#[utoipa::path(
    get,
    path = "/orders/outfits/gender/{gender}",
    responses((status = 200, description = "Catalog entries for a gender")),
    tag = "outfits"
)]
pub async fn list_outfits_by_gender(
    State(state): State<AppState>,
    Path(gender): Path<String>,
) -> Json<Vec<OutfitType>> {
    Json(state.services.outfits.by_gender(&gender))
}

#[utoipa::path(
    get,
    path = "/orders/outfits/name/{name}",
    responses(
        (status = 200, description = "Catalog entry"),
        (status = 404, description = "Unknown garment name", body = crate::errors::ErrorResponse)
    ),
    tag = "outfits"
)]
pub async fn get_outfit_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<OutfitType>, ServiceError> {
    state
        .services
        .outfits
        .by_name(&name)
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(format!("Unknown outfit: {name}")))
}
