use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::entities::shop;
use crate::errors::ServiceError;
use crate::services::shops::{CreateShopRequest, UpdateShopRequest};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop created"),
        (status = 409, description = "Duplicate mobile number", body = crate::errors::ErrorResponse)
    ),
    tag = "shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthUser>,
    Json(payload): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<shop::Model>), ServiceError> {
    let created = state
        .services
        .shops
        .create_shop(user.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Shops owned by the caller.
#[utoipa::path(
    get,
    path = "/shops",
    responses((status = 200, description = "Caller's shops")),
    tag = "shops"
)]
pub async fn list_shops(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthUser>,
) -> Result<Json<Vec<shop::Model>>, ServiceError> {
    let shops = state
        .services
        .shops
        .list_shops_by_owner(user.user_id)
        .await?;
    Ok(Json(shops))
}

#[utoipa::path(
    get,
    path = "/shops/{id}",
    responses(
        (status = 200, description = "Shop"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<shop::Model>, ServiceError> {
    let found = state.services.shops.get_shop(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    patch,
    path = "/shops/{id}",
    request_body = UpdateShopRequest,
    responses(
        (status = 200, description = "Shop updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shops"
)]
pub async fn update_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShopRequest>,
) -> Result<Json<shop::Model>, ServiceError> {
    let updated = state.services.shops.update_shop(id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/shops/{id}",
    responses(
        (status = 204, description = "Shop soft deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shops"
)]
pub async fn delete_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.shops.delete_shop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
