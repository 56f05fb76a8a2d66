use crate::{
    db::DbPool,
    entities::{
        cloth::{self, Entity as ClothEntity, Model as ClothModel},
        cost::{self, Entity as CostEntity, Model as CostModel},
        order::{self, Entity as OrderEntity},
        payment::{
            self, ActiveModel as PaymentActiveModel, Entity as PaymentEntity,
            Model as PaymentModel,
        },
    },
    errors::ServiceError,
    services::orders::OrderStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Amounts closer than this are considered equal when deciding whether a
/// stored payment needs correction.
const AMOUNT_EPSILON: Decimal = dec!(0.001);

/// What a delivered order should have been paid. Each cost row contributes
/// `total_cost` when present, otherwise material plus labor. Orders with no
/// cost rows at all fall back to the material cost recorded on the clothes.
pub fn derive_amount(costs: &[CostModel], clothes: &[ClothModel]) -> Decimal {
    if !costs.is_empty() {
        return costs
            .iter()
            .map(|c| {
                c.total_cost.unwrap_or_else(|| {
                    c.material_cost.unwrap_or(Decimal::ZERO)
                        + c.labor_cost.unwrap_or(Decimal::ZERO)
                })
            })
            .sum();
    }

    clothes
        .iter()
        .map(|c| c.material_cost.unwrap_or(Decimal::ZERO))
        .sum()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SyncOutcome {
    pub created: u64,
    pub updated: u64,
}

/// Payments as a derived, self-healing cache over delivered orders. Reads
/// repair bad rows in place; the sync backfills rows the write path missed.
#[derive(Clone)]
pub struct PaymentService {
    db_pool: Arc<DbPool>,
}

impl PaymentService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Payments for a shop with `paid_at` in [start, end], ascending. Any
    /// row with a non-positive amount is recomputed from its order's cost
    /// data and the fix persisted before the row is returned.
    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn get_payments_by_shop_and_range(
        &self,
        shop_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PaymentModel>, ServiceError> {
        let db = &*self.db_pool;

        let rows = PaymentEntity::find()
            .filter(payment::Column::ShopId.eq(shop_id))
            .filter(payment::Column::PaidAt.gte(start))
            .filter(payment::Column::PaidAt.lte(end))
            .order_by_asc(payment::Column::PaidAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch payments");
                ServiceError::DatabaseError(e)
            })?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            if row.amount > Decimal::ZERO {
                result.push(row);
                continue;
            }

            let expected = self.expected_amount_for_order(row.order_id).await?;
            if expected > Decimal::ZERO {
                warn!(payment_id = %row.id, order_id = %row.order_id, %expected,
                    "Repairing payment with non-positive amount");
                let mut active: PaymentActiveModel = row.into();
                active.amount = Set(expected);
                active.updated_at = Set(Some(Utc::now()));
                let repaired = active.update(db).await.map_err(|e| {
                    error!(error = %e, "Failed to persist payment repair");
                    ServiceError::DatabaseError(e)
                })?;
                result.push(repaired);
            } else {
                result.push(row);
            }
        }

        Ok(result)
    }

    /// Backfills payments for delivered orders in the window. An order's
    /// effective date is its delivery date, or the order date when delivery
    /// was never recorded. Missing payment with a positive expected amount
    /// is inserted; an existing payment off by more than the epsilon is
    /// corrected. Re-running immediately yields zero changes.
    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn sync_missing_payments_for_range(
        &self,
        shop_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SyncOutcome, ServiceError> {
        let db = &*self.db_pool;

        let delivered = OrderEntity::find()
            .filter(order::Column::ShopId.eq(shop_id))
            .filter(order::Column::Status.eq(OrderStatus::Delivered.to_string()))
            .filter(order::Column::DeletedAt.is_null())
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(order::Column::DeliveryDate.is_not_null())
                            .add(order::Column::DeliveryDate.gte(start))
                            .add(order::Column::DeliveryDate.lte(end)),
                    )
                    .add(
                        Condition::all()
                            .add(order::Column::DeliveryDate.is_null())
                            .add(order::Column::OrderDate.gte(start))
                            .add(order::Column::OrderDate.lte(end)),
                    ),
            )
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch delivered orders for payment sync");
                ServiceError::DatabaseError(e)
            })?;

        let mut outcome = SyncOutcome {
            created: 0,
            updated: 0,
        };

        for ord in delivered {
            let expected = self.expected_amount_for_order(ord.id).await?;
            let paid_at = ord.delivery_date.unwrap_or(ord.order_date);

            let existing = PaymentEntity::find()
                .filter(payment::Column::OrderId.eq(ord.id))
                .one(db)
                .await
                .map_err(|e| {
                    error!(error = %e, order_id = %ord.id, "Failed to look up payment during sync");
                    ServiceError::DatabaseError(e)
                })?;

            match existing {
                None if expected > Decimal::ZERO => {
                    let now = Utc::now();
                    let active = PaymentActiveModel {
                        id: Set(Uuid::new_v4()),
                        shop_id: Set(ord.shop_id),
                        order_id: Set(ord.id),
                        amount: Set(expected),
                        paid_at: Set(paid_at),
                        created_at: Set(now),
                        updated_at: Set(None),
                    };
                    active.insert(db).await.map_err(|e| {
                        error!(error = %e, order_id = %ord.id, "Failed to backfill payment");
                        ServiceError::DatabaseError(e)
                    })?;
                    outcome.created += 1;
                }
                Some(existing)
                    if expected > Decimal::ZERO
                        && (existing.amount - expected).abs() > AMOUNT_EPSILON =>
                {
                    let mut active: PaymentActiveModel = existing.into();
                    active.amount = Set(expected);
                    active.paid_at = Set(paid_at);
                    active.updated_at = Set(Some(Utc::now()));
                    active.update(db).await.map_err(|e| {
                        error!(error = %e, order_id = %ord.id, "Failed to correct payment");
                        ServiceError::DatabaseError(e)
                    })?;
                    outcome.updated += 1;
                }
                _ => {}
            }
        }

        if outcome.created > 0 || outcome.updated > 0 {
            info!(
                created = outcome.created,
                updated = outcome.updated,
                "Payment sync applied changes"
            );
        }

        Ok(outcome)
    }

    async fn expected_amount_for_order(&self, order_id: Uuid) -> Result<Decimal, ServiceError> {
        let db = &*self.db_pool;

        let costs = CostEntity::find()
            .filter(cost::Column::OrderId.eq(order_id))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id = %order_id, "Failed to fetch costs");
                ServiceError::DatabaseError(e)
            })?;

        let clothes = ClothEntity::find()
            .filter(cloth::Column::OrderId.eq(order_id))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id = %order_id, "Failed to fetch clothes");
                ServiceError::DatabaseError(e)
            })?;

        Ok(derive_amount(&costs, &clothes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cost(
        material: Option<Decimal>,
        labor: Option<Decimal>,
        total: Option<Decimal>,
    ) -> CostModel {
        CostModel {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            material_cost: material,
            labor_cost: labor,
            total_cost: total,
            created_at: Utc::now(),
        }
    }

    fn cloth(material: Option<Decimal>) -> ClothModel {
        ClothModel {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            garment_type: "kurta".to_string(),
            material_cost: material,
            price: None,
            design_notes: None,
            image_urls: None,
            video_urls: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_cost_wins_over_components() {
        let costs = vec![cost(Some(dec!(100)), Some(dec!(50)), Some(dec!(900)))];
        assert_eq!(derive_amount(&costs, &[]), dec!(900));
    }

    #[test]
    fn missing_total_sums_material_and_labor() {
        let costs = vec![
            cost(Some(dec!(100)), Some(dec!(50)), None),
            cost(None, Some(dec!(25)), None),
        ];
        assert_eq!(derive_amount(&costs, &[]), dec!(175));
    }

    #[test]
    fn clothes_fallback_only_without_cost_rows() {
        let clothes = vec![cloth(Some(dec!(300))), cloth(Some(dec!(200))), cloth(None)];
        assert_eq!(derive_amount(&[], &clothes), dec!(500));

        // A single cost row suppresses the clothes fallback entirely.
        let costs = vec![cost(None, Some(dec!(10)), None)];
        assert_eq!(derive_amount(&costs, &clothes), dec!(10));
    }

    #[test]
    fn empty_everything_is_zero() {
        assert_eq!(derive_amount(&[], &[]), Decimal::ZERO);
    }
}
