use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::tailor;
use crate::errors::ServiceError;
use crate::services::tailors::{CreateTailorRequest, UpdateTailorRequest};
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TailorListQuery {
    pub shop_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/tailors",
    request_body = CreateTailorRequest,
    responses((status = 201, description = "Tailor created")),
    tag = "tailors"
)]
pub async fn create_tailor(
    State(state): State<AppState>,
    Json(payload): Json<CreateTailorRequest>,
) -> Result<(StatusCode, Json<tailor::Model>), ServiceError> {
    let created = state.services.tailors.create_tailor(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/tailors",
    params(TailorListQuery),
    responses((status = 200, description = "Tailors for the shop")),
    tag = "tailors"
)]
pub async fn list_tailors(
    State(state): State<AppState>,
    Query(query): Query<TailorListQuery>,
) -> Result<Json<Vec<tailor::Model>>, ServiceError> {
    let tailors = state
        .services
        .tailors
        .list_tailors_by_shop(query.shop_id)
        .await?;
    Ok(Json(tailors))
}

#[utoipa::path(
    get,
    path = "/tailors/{id}",
    responses(
        (status = 200, description = "Tailor"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tailors"
)]
pub async fn get_tailor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<tailor::Model>, ServiceError> {
    let found = state.services.tailors.get_tailor(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    patch,
    path = "/tailors/{id}",
    request_body = UpdateTailorRequest,
    responses(
        (status = 200, description = "Tailor updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tailors"
)]
pub async fn update_tailor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTailorRequest>,
) -> Result<Json<tailor::Model>, ServiceError> {
    let updated = state.services.tailors.update_tailor(id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/tailors/{id}",
    responses(
        (status = 204, description = "Tailor soft deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "tailors"
)]
pub async fn delete_tailor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.tailors.delete_tailor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
