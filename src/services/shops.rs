use crate::{
    db::DbPool,
    entities::shop::{self, ActiveModel as ShopActiveModel, Entity as ShopEntity, Model as ShopModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateShopRequest {
    #[validate(length(min = 1, message = "Shop name is required"))]
    pub name: String,
    #[validate(length(min = 10, message = "Mobile number is required"))]
    pub mobile_number: String,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateShopRequest {
    #[validate(length(min = 1, message = "Shop name cannot be empty"))]
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
}

/// Shop CRUD scoped to the owning user. Deletes are soft and do not
/// cascade to customers, tailors or orders.
#[derive(Clone)]
pub struct ShopService {
    db_pool: Arc<DbPool>,
}

impl ShopService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(owner_id = %owner_id))]
    pub async fn create_shop(
        &self,
        owner_id: Uuid,
        request: CreateShopRequest,
    ) -> Result<ShopModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let active = ShopActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            name: Set(request.name),
            mobile_number: Set(request.mobile_number),
            address: Set(request.address),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let model = active.insert(db).await.map_err(|e| {
            ServiceError::conflict_on_duplicate(e, "A shop with this mobile number already exists")
        })?;

        info!(shop_id = %model.id, "Shop created");
        Ok(model)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_shops_by_owner(&self, owner_id: Uuid) -> Result<Vec<ShopModel>, ServiceError> {
        let db = &*self.db_pool;

        ShopEntity::find()
            .filter(shop::Column::OwnerId.eq(owner_id))
            .filter(shop::Column::DeletedAt.is_null())
            .order_by_desc(shop::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list shops");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn get_shop(&self, shop_id: Uuid) -> Result<ShopModel, ServiceError> {
        let db = &*self.db_pool;

        ShopEntity::find_by_id(shop_id)
            .filter(shop::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch shop");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Shop not found".to_string()))
    }

    #[instrument(skip(self, request), fields(shop_id = %shop_id))]
    pub async fn update_shop(
        &self,
        shop_id: Uuid,
        request: UpdateShopRequest,
    ) -> Result<ShopModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let found = self.get_shop(shop_id).await?;

        let mut active: ShopActiveModel = found.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(mobile_number) = request.mobile_number {
            active.mobile_number = Set(mobile_number);
        }
        if let Some(address) = request.address {
            active.address = Set(Some(address));
        }
        active.updated_at = Set(Some(Utc::now()));

        active.update(db).await.map_err(|e| {
            ServiceError::conflict_on_duplicate(e, "A shop with this mobile number already exists")
        })
    }

    /// Soft delete. Child rows keep their shop_id and remain readable.
    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn delete_shop(&self, shop_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let found = self.get_shop(shop_id).await?;

        let mut active: ShopActiveModel = found.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to soft delete shop");
            ServiceError::DatabaseError(e)
        })?;

        info!("Shop soft deleted");
        Ok(())
    }
}
