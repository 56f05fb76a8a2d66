use crate::{
    db::DbPool,
    entities::tailor::{
        self, ActiveModel as TailorActiveModel, Entity as TailorEntity, Model as TailorModel,
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Work state of a tailor. New tailors start `INACTIVE` and flip to
/// `ACTIVE` when an order is first assigned to them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
pub enum TailorStatus {
    #[strum(serialize = "ACTIVE")]
    Active,
    #[strum(serialize = "INACTIVE")]
    Inactive,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateTailorRequest {
    pub shop_id: Uuid,
    #[validate(length(min = 1, message = "Tailor name is required"))]
    pub name: String,
    #[validate(length(min = 10, message = "Mobile number is required"))]
    pub mobile_number: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateTailorRequest {
    #[validate(length(min = 1, message = "Tailor name cannot be empty"))]
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct TailorService {
    db_pool: Arc<DbPool>,
}

impl TailorService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(shop_id = %request.shop_id))]
    pub async fn create_tailor(
        &self,
        request: CreateTailorRequest,
    ) -> Result<TailorModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let active = TailorActiveModel {
            id: Set(Uuid::new_v4()),
            shop_id: Set(request.shop_id),
            name: Set(request.name),
            mobile_number: Set(request.mobile_number),
            status: Set(TailorStatus::Inactive.to_string()),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create tailor");
            ServiceError::DatabaseError(e)
        })?;

        info!(tailor_id = %model.id, "Tailor created");
        Ok(model)
    }

    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn list_tailors_by_shop(
        &self,
        shop_id: Uuid,
    ) -> Result<Vec<TailorModel>, ServiceError> {
        let db = &*self.db_pool;

        TailorEntity::find()
            .filter(tailor::Column::ShopId.eq(shop_id))
            .filter(tailor::Column::DeletedAt.is_null())
            .order_by_desc(tailor::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list tailors");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self), fields(tailor_id = %tailor_id))]
    pub async fn get_tailor(&self, tailor_id: Uuid) -> Result<TailorModel, ServiceError> {
        let db = &*self.db_pool;

        TailorEntity::find_by_id(tailor_id)
            .filter(tailor::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch tailor");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))
    }

    #[instrument(skip(self, request), fields(tailor_id = %tailor_id))]
    pub async fn update_tailor(
        &self,
        tailor_id: Uuid,
        request: UpdateTailorRequest,
    ) -> Result<TailorModel, ServiceError> {
        request.validate()?;

        if let Some(status) = &request.status {
            status
                .parse::<TailorStatus>()
                .map_err(|_| ServiceError::InvalidStatus(format!("Unknown status: {status}")))?;
        }

        let db = &*self.db_pool;
        let found = self.get_tailor(tailor_id).await?;

        let mut active: TailorActiveModel = found.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(mobile_number) = request.mobile_number {
            active.mobile_number = Set(mobile_number);
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Some(Utc::now()));

        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to update tailor");
            ServiceError::DatabaseError(e)
        })
    }

    #[instrument(skip(self), fields(tailor_id = %tailor_id))]
    pub async fn delete_tailor(&self, tailor_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let found = self.get_tailor(tailor_id).await?;

        let mut active: TailorActiveModel = found.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to soft delete tailor");
            ServiceError::DatabaseError(e)
        })?;

        info!("Tailor soft deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        assert_eq!(
            "ACTIVE".parse::<TailorStatus>().unwrap(),
            TailorStatus::Active
        );
        assert_eq!(TailorStatus::Inactive.to_string(), "INACTIVE");
        assert!("RETIRED".parse::<TailorStatus>().is_err());
    }
}
