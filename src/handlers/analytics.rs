use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::analytics::{CountBucket, MonthlyRevenue};
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WindowQuery {
    pub shop_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct YearQuery {
    pub shop_id: Uuid,
    pub year: i32,
}

#[utoipa::path(
    get,
    path = "/analytics/order-types",
    params(WindowQuery),
    responses((status = 200, description = "Order counts by type", body = [CountBucket])),
    tag = "analytics"
)]
pub async fn order_type_counts(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<CountBucket>>, ServiceError> {
    let buckets = state
        .services
        .analytics
        .order_type_counts(query.shop_id, query.start, query.end)
        .await?;
    Ok(Json(buckets))
}

#[utoipa::path(
    get,
    path = "/analytics/order-status",
    params(WindowQuery),
    responses((status = 200, description = "Order counts by status", body = [CountBucket])),
    tag = "analytics"
)]
pub async fn order_status_counts(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<CountBucket>>, ServiceError> {
    let buckets = state
        .services
        .analytics
        .order_status_counts(query.shop_id, query.start, query.end)
        .await?;
    Ok(Json(buckets))
}

#[utoipa::path(
    get,
    path = "/analytics/monthly-revenue",
    params(YearQuery),
    responses((status = 200, description = "Revenue per month", body = [MonthlyRevenue])),
    tag = "analytics"
)]
pub async fn monthly_revenue(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<MonthlyRevenue>>, ServiceError> {
    let months = state
        .services
        .analytics
        .monthly_revenue(query.shop_id, query.year)
        .await?;
    Ok(Json(months))
}
