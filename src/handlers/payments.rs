use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::payment;
use crate::errors::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub shop_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentListResponse {
    #[schema(value_type = Vec<Object>)]
    pub payments: Vec<payment::Model>,
    pub synced_created: u64,
    pub synced_updated: u64,
    pub total: usize,
}

/// Backfills the window before reading it, so the response reflects every
/// delivered order even when the write-path payment step failed.
#[utoipa::path(
    get,
    path = "/payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Payments in range with sync counters", body = PaymentListResponse),
        (status = 400, description = "Invalid range", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<PaymentListResponse>, ServiceError> {
    if query.end < query.start {
        return Err(ServiceError::InvalidInput(
            "end must not precede start".to_string(),
        ));
    }

    let outcome = state
        .services
        .payments
        .sync_missing_payments_for_range(query.shop_id, query.start, query.end)
        .await?;

    let payments = state
        .services
        .payments
        .get_payments_by_shop_and_range(query.shop_id, query.start, query.end)
        .await?;

    Ok(Json(PaymentListResponse {
        total: payments.len(),
        synced_created: outcome.created,
        synced_updated: outcome.updated,
        payments,
    }))
}
