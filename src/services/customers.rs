use crate::{
    db::DbPool,
    entities::customer::{
        self, ActiveModel as CustomerActiveModel, Entity as CustomerEntity, Model as CustomerModel,
    },
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
pub struct CreateCustomerRequest {
    pub shop_id: Uuid,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(length(min = 10, message = "Mobile number is required"))]
    pub mobile_number: String,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, message = "Customer name cannot be empty"))]
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
}

/// Customer records under a shop. Soft deleted; measurements and orders
/// keep pointing at deleted customers for history.
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(shop_id = %request.shop_id))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let active = CustomerActiveModel {
            id: Set(Uuid::new_v4()),
            shop_id: Set(request.shop_id),
            name: Set(request.name),
            mobile_number: Set(request.mobile_number),
            address: Set(request.address),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create customer");
            ServiceError::DatabaseError(e)
        })?;

        info!(customer_id = %model.id, "Customer created");
        Ok(model)
    }

    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn list_customers_by_shop(
        &self,
        shop_id: Uuid,
    ) -> Result<Vec<CustomerModel>, ServiceError> {
        let db = &*self.db_pool;

        CustomerEntity::find()
            .filter(customer::Column::ShopId.eq(shop_id))
            .filter(customer::Column::DeletedAt.is_null())
            .order_by_desc(customer::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list customers");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn get_customer(&self, customer_id: Uuid) -> Result<CustomerModel, ServiceError> {
        let db = &*self.db_pool;

        CustomerEntity::find_by_id(customer_id)
            .filter(customer::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch customer");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))
    }

    #[instrument(skip(self, request), fields(customer_id = %customer_id))]
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let found = self.get_customer(customer_id).await?;

        let mut active: CustomerActiveModel = found.into();
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
            error!(error = %e, "Failed to update customer");
            ServiceError::DatabaseError(e)
        })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let found = self.get_customer(customer_id).await?;

        let mut active: CustomerActiveModel = found.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to soft delete customer");
            ServiceError::DatabaseError(e)
        })?;

        info!("Customer soft deleted");
        Ok(())
    }
}
