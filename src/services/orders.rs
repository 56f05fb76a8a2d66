use crate::{
    db::DbPool,
    entities::{
        cloth::{self, ActiveModel as ClothActiveModel, Entity as ClothEntity, Model as ClothModel},
        cost::{self, ActiveModel as CostActiveModel, Entity as CostEntity, Model as CostModel},
        customer::{Entity as CustomerEntity, Model as CustomerModel},
        measurement::{self, Entity as MeasurementEntity, Model as MeasurementModel},
        order::{self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel},
        payment::{self, ActiveModel as PaymentActiveModel, Entity as PaymentEntity},
        tailor::{ActiveModel as TailorActiveModel, Entity as TailorEntity},
    },
    errors::ServiceError,
    services::{
        costs::CostInput, measurements::MeasurementInput, payments::derive_amount,
        tailors::TailorStatus,
    },
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
pub enum OrderStatus {
    #[strum(serialize = "PENDING")]
    Pending,
    #[strum(serialize = "IN_PROGRESS")]
    InProgress,
    #[strum(serialize = "DELIVERED")]
    Delivered,
    #[strum(serialize = "CANCELLED")]
    Cancelled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
pub enum OrderType {
    #[strum(serialize = "STITCHING")]
    Stitching,
    #[strum(serialize = "ALTERATION")]
    Alteration,
}

fn parse_status(s: &str) -> Result<OrderStatus, ServiceError> {
    OrderStatus::from_str(s)
        .map_err(|_| ServiceError::InvalidStatus(format!("Unknown order status: {s}")))
}

fn parse_order_type(s: &str) -> Result<OrderType, ServiceError> {
    OrderType::from_str(s)
        .map_err(|_| ServiceError::InvalidInput(format!("Unknown order type: {s}")))
}

/// One garment in an order request, optionally carrying the measurement
/// taken for it. The measurement is linked back to this garment by its
/// position in the list.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClothInput {
    pub garment_type: String,
    pub material_cost: Option<Decimal>,
    pub price: Option<Decimal>,
    pub design_notes: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub video_urls: Option<Vec<String>>,
    pub measurement: Option<MeasurementInput>,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub shop_id: Uuid,
    pub status: Option<String>,
    #[validate(length(min = 1, message = "Order type is required"))]
    pub order_type: String,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub alteration_price: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(default)]
    pub clothes: Vec<ClothInput>,
    #[serde(default)]
    pub costs: Vec<CostInput>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<String>,
    pub order_type: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub alteration_price: Option<Decimal>,
    pub assigned_to: Option<Uuid>,
    pub notes: Option<String>,
    /// When present, replaces every cloth row of the order.
    pub clothes: Option<Vec<ClothInput>>,
    /// When present, replaces every cost row of the order.
    pub costs: Option<Vec<CostInput>>,
    /// When present, replaces every measurement row of the order, linked
    /// positionally against the order's clothes.
    pub measurements: Option<Vec<MeasurementInput>>,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct AssignOrderRequest {
    pub tailor_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClothResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub garment_type: String,
    pub material_cost: Option<Decimal>,
    pub price: Option<Decimal>,
    pub design_notes: Option<String>,
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Vec<Object>)]
    pub measurements: Vec<MeasurementModel>,
}

impl ClothResponse {
    fn from_model(model: ClothModel, measurements: Vec<MeasurementModel>) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            garment_type: model.garment_type,
            material_cost: model.material_cost,
            price: model.price,
            design_notes: model.design_notes,
            image_urls: decode_url_list(model.image_urls.as_deref()),
            video_urls: decode_url_list(model.video_urls.as_deref()),
            created_at: model.created_at,
            measurements,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDetailsResponse {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub order: OrderModel,
    pub clothes: Vec<ClothResponse>,
    #[schema(value_type = Vec<Object>)]
    pub costs: Vec<CostModel>,
    #[schema(value_type = Object)]
    pub customer: Option<CustomerModel>,
}

fn encode_url_list(urls: &Option<Vec<String>>) -> Option<String> {
    urls.as_ref()
        .map(|list| serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string()))
}

fn decode_url_list(stored: Option<&str>) -> Vec<String> {
    stored
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Sum of `(price ?? 0) + (material_cost ?? 0)` over the clothes list.
fn order_total(clothes: &[ClothInput]) -> Decimal {
    clothes
        .iter()
        .map(|c| c.price.unwrap_or(Decimal::ZERO) + c.material_cost.unwrap_or(Decimal::ZERO))
        .sum()
}

/// Order aggregate: the order row plus its clothes, measurements and
/// costs, written together. Child lists are replaced wholesale on update.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, shop_id = %request.shop_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderDetailsResponse, ServiceError> {
        request.validate()?;

        let status = match &request.status {
            Some(s) => parse_status(s)?,
            None => OrderStatus::Pending,
        };
        parse_order_type(&request.order_type)?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let order_id = Uuid::new_v4();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for order creation");
            ServiceError::DatabaseError(e)
        })?;

        let order_active = OrderActiveModel {
            id: Set(order_id),
            customer_id: Set(request.customer_id),
            shop_id: Set(request.shop_id),
            status: Set(status.to_string()),
            order_type: Set(request.order_type.clone()),
            order_date: Set(request.order_date.unwrap_or(now)),
            delivery_date: Set(request.delivery_date),
            total_amount: Set(order_total(&request.clothes)),
            alteration_price: Set(request.alteration_price),
            assigned_to: Set(None),
            notes: Set(request.notes.clone()),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let order_model = order_active.insert(&txn).await.map_err(|e| {
            error!(error = %e, order_id = %order_id, "Failed to insert order");
            ServiceError::DatabaseError(e)
        })?;

        let measurements: Vec<(usize, MeasurementInput)> = request
            .clothes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.measurement.clone().map(|m| (i, m)))
            .collect();

        let cloth_ids =
            insert_clothes(&txn, order_id, &request.clothes).await?;
        insert_costs(&txn, order_id, &request.costs).await?;
        link_measurements(
            &txn,
            request.customer_id,
            order_id,
            &cloth_ids,
            measurements,
        )
        .await?;

        if status == OrderStatus::Delivered {
            upsert_delivery_payment(&txn, &order_model).await;
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, order_id = %order_id, "Failed to commit order creation");
            ServiceError::DatabaseError(e)
        })?;

        info!(order_id = %order_id, "Order created");
        self.get_order_details(order_id).await
    }

    /// The order with its clothes (each carrying its measurements), costs
    /// and customer. Soft-deleted orders are absent.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order_details(
        &self,
        order_id: Uuid,
    ) -> Result<OrderDetailsResponse, ServiceError> {
        let db = &*self.db_pool;

        let order_model = OrderEntity::find_by_id(order_id)
            .filter(order::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch order");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let clothes = ClothEntity::find()
            .filter(cloth::Column::OrderId.eq(order_id))
            .order_by_asc(cloth::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let measurements = MeasurementEntity::find()
            .filter(measurement::Column::OrderId.eq(order_id))
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let costs = CostEntity::find()
            .filter(cost::Column::OrderId.eq(order_id))
            .order_by_asc(cost::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let customer = CustomerEntity::find_by_id(order_model.customer_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let clothes = clothes
            .into_iter()
            .map(|c| {
                let for_cloth = measurements
                    .iter()
                    .filter(|m| m.cloth_id == Some(c.id))
                    .cloned()
                    .collect();
                ClothResponse::from_model(c, for_cloth)
            })
            .collect();

        Ok(OrderDetailsResponse {
            order: order_model,
            clothes,
            costs,
            customer,
        })
    }

    /// Newest first, optional shop and status filters.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        shop_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Vec<OrderModel>, ServiceError> {
        let db = &*self.db_pool;

        let mut query = OrderEntity::find().filter(order::Column::DeletedAt.is_null());
        if let Some(shop_id) = shop_id {
            query = query.filter(order::Column::ShopId.eq(shop_id));
        }
        if let Some(status) = status {
            parse_status(&status)?;
            query = query.filter(order::Column::Status.eq(status));
        }

        query
            .order_by_desc(order::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list orders");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self), fields(tailor_id = %tailor_id))]
    pub async fn list_orders_by_tailor(
        &self,
        tailor_id: Uuid,
    ) -> Result<Vec<OrderModel>, ServiceError> {
        let db = &*self.db_pool;

        OrderEntity::find()
            .filter(order::Column::AssignedTo.eq(tailor_id))
            .filter(order::Column::DeletedAt.is_null())
            .order_by_desc(order::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list assigned orders");
                ServiceError::DatabaseError(e)
            })
    }

    /// Assigns the order to a tailor; an inactive tailor becomes active on
    /// first assignment.
    #[instrument(skip(self), fields(order_id = %order_id, tailor_id = %request.tailor_id))]
    pub async fn assign_order(
        &self,
        order_id: Uuid,
        request: AssignOrderRequest,
    ) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;

        let order_model = self.find_live_order(order_id).await?;
        let tailor = TailorEntity::find_by_id(request.tailor_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;

        let txn = db.begin().await.map_err(ServiceError::DatabaseError)?;

        let mut active: OrderActiveModel = order_model.into();
        active.assigned_to = Set(Some(request.tailor_id));
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await.map_err(|e| {
            error!(error = %e, "Failed to assign order");
            ServiceError::DatabaseError(e)
        })?;

        if tailor.status == TailorStatus::Inactive.to_string() {
            let mut tailor_active: TailorActiveModel = tailor.into();
            tailor_active.status = Set(TailorStatus::Active.to_string());
            tailor_active.updated_at = Set(Some(Utc::now()));
            tailor_active.update(&txn).await.map_err(|e| {
                error!(error = %e, "Failed to activate tailor on assignment");
                ServiceError::DatabaseError(e)
            })?;
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!("Order assigned");
        Ok(updated)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn unassign_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;
        let order_model = self.find_live_order(order_id).await?;

        let mut active: OrderActiveModel = order_model.into();
        active.assigned_to = Set(None);
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to unassign order");
            ServiceError::DatabaseError(e)
        })
    }

    /// Status change. Delivery triggers the payment find-or-create; calling
    /// it twice with the same status leaves a single payment row.
    #[instrument(skip(self, request), fields(order_id = %order_id, new_status = %request.status))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        request: UpdateOrderStatusRequest,
    ) -> Result<OrderModel, ServiceError> {
        request.validate()?;
        let status = parse_status(&request.status)?;

        let db = &*self.db_pool;
        let order_model = self.find_live_order(order_id).await?;

        let txn = db.begin().await.map_err(ServiceError::DatabaseError)?;

        let mut active: OrderActiveModel = order_model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await.map_err(|e| {
            error!(error = %e, "Failed to update order status");
            ServiceError::DatabaseError(e)
        })?;

        if status == OrderStatus::Delivered {
            upsert_delivery_payment(&txn, &updated).await;
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!("Order status updated");
        Ok(updated)
    }

    /// Whole-aggregate update in one transaction, fixed step order: patch
    /// scalars, clear measurements, replace clothes, replace costs, re-link
    /// measurements positionally, then the delivery payment side effect.
    /// Omitted child lists leave existing rows untouched.
    #[instrument(skip(self, request), fields(order_id = %order_id))]
    pub async fn update_order(
        &self,
        order_id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<OrderDetailsResponse, ServiceError> {
        if let Some(s) = &request.status {
            parse_status(s)?;
        }
        if let Some(t) = &request.order_type {
            parse_order_type(t)?;
        }

        let db = &*self.db_pool;
        let order_model = self.find_live_order(order_id).await?;
        let customer_id = order_model.customer_id;
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for order update");
            ServiceError::DatabaseError(e)
        })?;

        // Step 1: scalars.
        let mut active: OrderActiveModel = order_model.into();
        if let Some(status) = &request.status {
            active.status = Set(status.clone());
        }
        if let Some(order_type) = &request.order_type {
            active.order_type = Set(order_type.clone());
        }
        if let Some(order_date) = request.order_date {
            active.order_date = Set(order_date);
        }
        if let Some(delivery_date) = request.delivery_date {
            active.delivery_date = Set(Some(delivery_date));
        }
        if let Some(alteration_price) = request.alteration_price {
            active.alteration_price = Set(Some(alteration_price));
        }
        if let Some(assigned_to) = request.assigned_to {
            active.assigned_to = Set(Some(assigned_to));
        }
        if let Some(notes) = &request.notes {
            active.notes = Set(Some(notes.clone()));
        }
        if let Some(clothes) = &request.clothes {
            active.total_amount = Set(order_total(clothes));
        }
        active.updated_at = Set(Some(now));

        let updated = active.update(&txn).await.map_err(|e| {
            error!(error = %e, "Failed to update order scalars");
            ServiceError::DatabaseError(e)
        })?;

        // Step 2: clear measurements before the clothes they point at go.
        if request.measurements.is_some() {
            MeasurementEntity::delete_many()
                .filter(measurement::Column::OrderId.eq(order_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to clear measurements");
                    ServiceError::DatabaseError(e)
                })?;
        }

        // Step 3: replace clothes.
        if let Some(clothes) = &request.clothes {
            ClothEntity::delete_many()
                .filter(cloth::Column::OrderId.eq(order_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to clear clothes");
                    ServiceError::DatabaseError(e)
                })?;
            insert_clothes(&txn, order_id, clothes).await?;
        }

        // Step 4: replace costs.
        if let Some(costs) = &request.costs {
            CostEntity::delete_many()
                .filter(cost::Column::OrderId.eq(order_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to clear costs");
                    ServiceError::DatabaseError(e)
                })?;
            insert_costs(&txn, order_id, costs).await?;
        }

        // Step 5: re-link measurements against the clothes now on the order.
        if let Some(measurements) = request.measurements {
            let cloth_ids: Vec<Uuid> = ClothEntity::find()
                .filter(cloth::Column::OrderId.eq(order_id))
                .order_by_asc(cloth::Column::CreatedAt)
                .all(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .into_iter()
                .map(|c| c.id)
                .collect();

            let indexed = measurements.into_iter().enumerate().collect();
            link_measurements(&txn, customer_id, order_id, &cloth_ids, indexed).await?;
        }

        // Step 6: delivery payment, never fatal.
        if updated.status == OrderStatus::Delivered.to_string() {
            upsert_delivery_payment(&txn, &updated).await;
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit order update");
            ServiceError::DatabaseError(e)
        })?;

        info!("Order updated");
        self.get_order_details(order_id).await
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let order_model = self.find_live_order(order_id).await?;

        let mut active: OrderActiveModel = order_model.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(db).await.map_err(|e| {
            error!(error = %e, "Failed to soft delete order");
            ServiceError::DatabaseError(e)
        })?;

        info!("Order soft deleted");
        Ok(())
    }

    async fn find_live_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;

        OrderEntity::find_by_id(order_id)
            .filter(order::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id = %order_id, "Failed to fetch order");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))
    }
}

/// Inserts clothes one at a time so ids come back in submission order;
/// the returned list drives positional measurement linking.
async fn insert_clothes<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    clothes: &[ClothInput],
) -> Result<Vec<Uuid>, ServiceError> {
    let mut ids = Vec::with_capacity(clothes.len());
    let base = Utc::now();

    for (i, input) in clothes.iter().enumerate() {
        let id = Uuid::new_v4();
        let active = ClothActiveModel {
            id: Set(id),
            order_id: Set(order_id),
            garment_type: Set(input.garment_type.clone()),
            material_cost: Set(input.material_cost),
            price: Set(input.price),
            design_notes: Set(input.design_notes.clone()),
            image_urls: Set(encode_url_list(&input.image_urls)),
            video_urls: Set(encode_url_list(&input.video_urls)),
            // Spread timestamps so creation order survives a sort.
            created_at: Set(base + chrono::Duration::microseconds(i as i64)),
        };
        active.insert(conn).await.map_err(|e| {
            error!(error = %e, order_id = %order_id, "Failed to insert cloth");
            ServiceError::DatabaseError(e)
        })?;
        ids.push(id);
    }

    Ok(ids)
}

async fn insert_costs<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    costs: &[CostInput],
) -> Result<(), ServiceError> {
    let models: Vec<CostActiveModel> = costs
        .iter()
        .map(|input| CostActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            material_cost: Set(input.material_cost),
            labor_cost: Set(input.labor_cost),
            total_cost: Set(input.total_cost),
            created_at: Set(Utc::now()),
        })
        .collect();

    CostEntity::insert_many(models)
        .on_empty_do_nothing()
        .exec(conn)
        .await
        .map_err(|e| {
            error!(error = %e, order_id = %order_id, "Failed to insert costs");
            ServiceError::DatabaseError(e)
        })?;

    Ok(())
}

/// Pairs measurement i with cloth i. A measurement whose index has no
/// cloth is dropped without error.
async fn link_measurements<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    order_id: Uuid,
    cloth_ids: &[Uuid],
    measurements: Vec<(usize, MeasurementInput)>,
) -> Result<(), ServiceError> {
    for (index, input) in measurements {
        let Some(cloth_id) = cloth_ids.get(index).copied() else {
            warn!(order_id = %order_id, index, "Dropping measurement with no matching cloth");
            continue;
        };

        input
            .into_active_model(customer_id, Some(order_id), Some(cloth_id))
            .insert(conn)
            .await
            .map_err(|e| {
                error!(error = %e, order_id = %order_id, "Failed to insert measurement");
                ServiceError::DatabaseError(e)
            })?;
    }

    Ok(())
}

/// Find-or-create the payment for a delivered order. Amount comes from
/// the order's cost rows (clothes material cost as fallback); `paid_at` is
/// the delivery date or now. Errors are logged and swallowed so a ledger
/// hiccup never loses the order write.
async fn upsert_delivery_payment<C: ConnectionTrait>(conn: &C, order_model: &OrderModel) {
    if let Err(e) = try_upsert_delivery_payment(conn, order_model).await {
        warn!(error = %e, order_id = %order_model.id, "Delivery payment upsert failed");
    }
}

async fn try_upsert_delivery_payment<C: ConnectionTrait>(
    conn: &C,
    order_model: &OrderModel,
) -> Result<(), ServiceError> {
    let costs = CostEntity::find()
        .filter(cost::Column::OrderId.eq(order_model.id))
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;
    let clothes = ClothEntity::find()
        .filter(cloth::Column::OrderId.eq(order_model.id))
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let amount = derive_amount(&costs, &clothes);
    let paid_at = order_model.delivery_date.unwrap_or_else(Utc::now);
    let now = Utc::now();

    let existing = PaymentEntity::find()
        .filter(payment::Column::OrderId.eq(order_model.id))
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    match existing {
        Some(found) => {
            let mut active: PaymentActiveModel = found.into();
            active.amount = Set(amount);
            active.paid_at = Set(paid_at);
            active.updated_at = Set(Some(now));
            active.update(conn).await.map_err(ServiceError::DatabaseError)?;
        }
        None => {
            let active = PaymentActiveModel {
                id: Set(Uuid::new_v4()),
                shop_id: Set(order_model.shop_id),
                order_id: Set(order_model.id),
                amount: Set(amount),
                paid_at: Set(paid_at),
                created_at: Set(now),
                updated_at: Set(None),
            };
            active.insert(conn).await.map_err(ServiceError::DatabaseError)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn cloth_input(price: Option<Decimal>, material: Option<Decimal>) -> ClothInput {
        ClothInput {
            garment_type: "kurta".to_string(),
            material_cost: material,
            price,
            design_notes: None,
            image_urls: None,
            video_urls: None,
            measurement: None,
        }
    }

    #[test]
    fn total_sums_price_and_material_per_cloth() {
        let clothes = vec![
            cloth_input(Some(dec!(500)), None),
            cloth_input(Some(dec!(600)), Some(dec!(100))),
            cloth_input(None, None),
        ];
        assert_eq!(order_total(&clothes), dec!(1200));
    }

    #[test]
    fn empty_clothes_total_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test_case("PENDING", OrderStatus::Pending)]
    #[test_case("IN_PROGRESS", OrderStatus::InProgress)]
    #[test_case("DELIVERED", OrderStatus::Delivered)]
    #[test_case("CANCELLED", OrderStatus::Cancelled)]
    fn status_strings_round_trip(raw: &str, expected: OrderStatus) {
        assert_eq!(parse_status(raw).unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn unknown_status_and_type_are_rejected() {
        assert_matches!(parse_status("SHIPPED"), Err(ServiceError::InvalidStatus(_)));
        assert!(parse_order_type("STITCHING").is_ok());
        assert_matches!(parse_order_type("REPAIR"), Err(ServiceError::InvalidInput(_)));
    }

    #[test]
    fn url_lists_round_trip_through_text() {
        let urls = Some(vec!["https://a/1.jpg".to_string(), "https://a/2.jpg".to_string()]);
        let encoded = encode_url_list(&urls);
        assert_eq!(decode_url_list(encoded.as_deref()), urls.unwrap());
        assert!(decode_url_list(None).is_empty());
        assert!(decode_url_list(Some("not-json")).is_empty());
    }
}
