use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::cost;
use crate::errors::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CostListQuery {
    pub order_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/costs",
    params(CostListQuery),
    responses((status = 200, description = "Costs for the order")),
    tag = "costs"
)]
pub async fn list_costs(
    State(state): State<AppState>,
    Query(query): Query<CostListQuery>,
) -> Result<Json<Vec<cost::Model>>, ServiceError> {
    let costs = state
        .services
        .costs
        .list_costs_by_order(query.order_id)
        .await?;
    Ok(Json(costs))
}
