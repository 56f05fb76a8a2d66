use crate::{
    db::DbPool,
    entities::cost::{self, Entity as CostEntity, Model as CostModel},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

/// Cost fields as they arrive nested inside order create/update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CostInput {
    pub material_cost: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
}

#[derive(Clone)]
pub struct CostService {
    db_pool: Arc<DbPool>,
}

impl CostService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn list_costs_by_order(&self, order_id: Uuid) -> Result<Vec<CostModel>, ServiceError> {
        let db = &*self.db_pool;

        CostEntity::find()
            .filter(cost::Column::OrderId.eq(order_id))
            .order_by_asc(cost::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list costs");
                ServiceError::DatabaseError(e)
            })
    }
}
