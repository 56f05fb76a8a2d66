use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::measurement;
use crate::errors::ServiceError;
use crate::services::measurements::CreateMeasurementRequest;
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementListQuery {
    pub customer_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/measurements",
    request_body = CreateMeasurementRequest,
    responses((status = 201, description = "Measurement recorded")),
    tag = "measurements"
)]
pub async fn create_measurement(
    State(state): State<AppState>,
    Json(payload): Json<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<measurement::Model>), ServiceError> {
    let created = state
        .services
        .measurements
        .create_measurement(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/measurements",
    params(MeasurementListQuery),
    responses((status = 200, description = "Measurements for the customer")),
    tag = "measurements"
)]
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(query): Query<MeasurementListQuery>,
) -> Result<Json<Vec<measurement::Model>>, ServiceError> {
    let measurements = state
        .services
        .measurements
        .list_measurements_by_customer(query.customer_id)
        .await?;
    Ok(Json(measurements))
}
