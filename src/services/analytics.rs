use crate::{
    db::DbPool,
    entities::order::{self, Entity as OrderEntity},
    errors::ServiceError,
    services::payments::PaymentService,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CountBucket {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MonthlyRevenue {
    /// 1-12
    pub month: u32,
    pub revenue: Decimal,
}

/// Read-only rollups over orders and payments. Every query syncs the
/// payment cache for its window first, so analytics never see a delivered
/// order without its payment row.
#[derive(Clone)]
pub struct AnalyticsService {
    db_pool: Arc<DbPool>,
    payments: PaymentService,
}

impl AnalyticsService {
    pub fn new(db_pool: Arc<DbPool>, payments: PaymentService) -> Self {
        Self { db_pool, payments }
    }

    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn order_type_counts(
        &self,
        shop_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CountBucket>, ServiceError> {
        self.payments
            .sync_missing_payments_for_range(shop_id, start, end)
            .await?;

        let orders = self.orders_in_window(shop_id, start, end).await?;
        Ok(bucket_by(orders.iter().map(|o| o.order_type.clone())))
    }

    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn order_status_counts(
        &self,
        shop_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CountBucket>, ServiceError> {
        self.payments
            .sync_missing_payments_for_range(shop_id, start, end)
            .await?;

        let orders = self.orders_in_window(shop_id, start, end).await?;
        Ok(bucket_by(orders.iter().map(|o| o.status.clone())))
    }

    /// Revenue per calendar month of the year, from the payment ledger.
    #[instrument(skip(self), fields(shop_id = %shop_id, year = year))]
    pub async fn monthly_revenue(
        &self,
        shop_id: Uuid,
        year: i32,
    ) -> Result<Vec<MonthlyRevenue>, ServiceError> {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid year: {year}")))?;
        let end = Utc
            .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
            .single()
            .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid year: {year}")))?;

        self.payments
            .sync_missing_payments_for_range(shop_id, start, end)
            .await?;

        let payments = self
            .payments
            .get_payments_by_shop_and_range(shop_id, start, end)
            .await?;

        let mut months: BTreeMap<u32, Decimal> = (1..=12).map(|m| (m, Decimal::ZERO)).collect();
        for p in payments {
            use chrono::Datelike;
            *months.entry(p.paid_at.month()).or_default() += p.amount;
        }

        Ok(months
            .into_iter()
            .map(|(month, revenue)| MonthlyRevenue { month, revenue })
            .collect())
    }

    async fn orders_in_window(
        &self,
        shop_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<order::Model>, ServiceError> {
        let db = &*self.db_pool;

        OrderEntity::find()
            .filter(order::Column::ShopId.eq(shop_id))
            .filter(order::Column::DeletedAt.is_null())
            .filter(order::Column::OrderDate.gte(start))
            .filter(order::Column::OrderDate.lte(end))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch orders for analytics");
                ServiceError::DatabaseError(e)
            })
    }
}

fn bucket_by(keys: impl Iterator<Item = String>) -> Vec<CountBucket> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| CountBucket { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucketing_counts_and_sorts() {
        let keys = ["STITCHING", "ALTERATION", "STITCHING"]
            .iter()
            .map(|s| s.to_string());
        let buckets = bucket_by(keys);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "ALTERATION");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].key, "STITCHING");
        assert_eq!(buckets[1].count, 2);
    }
}
