use crate::{
    db::DbPool,
    entities::measurement::{
        self, ActiveModel as MeasurementActiveModel, Entity as MeasurementEntity,
        Model as MeasurementModel,
    },
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

/// Measurement fields as they arrive in requests, either standalone or
/// nested inside an order's clothes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MeasurementInput {
    pub chest: Option<Decimal>,
    pub waist: Option<Decimal>,
    pub hip: Option<Decimal>,
    pub shoulder: Option<Decimal>,
    pub sleeve_length: Option<Decimal>,
    pub top_length: Option<Decimal>,
    pub bottom_length: Option<Decimal>,
    pub neck: Option<Decimal>,
    pub inseam: Option<Decimal>,
    pub notes: Option<String>,
}

impl MeasurementInput {
    /// Builds the row, optionally bound to an order and one of its clothes.
    pub fn into_active_model(
        self,
        customer_id: Uuid,
        order_id: Option<Uuid>,
        cloth_id: Option<Uuid>,
    ) -> MeasurementActiveModel {
        MeasurementActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            order_id: Set(order_id),
            cloth_id: Set(cloth_id),
            chest: Set(self.chest),
            waist: Set(self.waist),
            hip: Set(self.hip),
            shoulder: Set(self.shoulder),
            sleeve_length: Set(self.sleeve_length),
            top_length: Set(self.top_length),
            bottom_length: Set(self.bottom_length),
            neck: Set(self.neck),
            inseam: Set(self.inseam),
            notes: Set(self.notes),
            created_at: Set(Utc::now()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateMeasurementRequest {
    pub customer_id: Uuid,
    #[serde(flatten)]
    pub measurement: MeasurementInput,
}

#[derive(Clone)]
pub struct MeasurementService {
    db_pool: Arc<DbPool>,
}

impl MeasurementService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Standalone measurement, not tied to any order.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create_measurement(
        &self,
        request: CreateMeasurementRequest,
    ) -> Result<MeasurementModel, ServiceError> {
        let db = &*self.db_pool;

        request
            .measurement
            .into_active_model(request.customer_id, None, None)
            .insert(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create measurement");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn list_measurements_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<MeasurementModel>, ServiceError> {
        let db = &*self.db_pool;

        MeasurementEntity::find()
            .filter(measurement::Column::CustomerId.eq(customer_id))
            .order_by_desc(measurement::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list measurements");
                ServiceError::DatabaseError(e)
            })
    }
}
