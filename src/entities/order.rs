use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stitching or alteration job. `total_amount` is fixed at creation time
/// from the supplied clothes and only changes through the explicit update
/// path.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub shop_id: Uuid,
    pub status: String,
    pub order_type: String,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub total_amount: Decimal,
    pub alteration_price: Option<Decimal>,
    pub assigned_to: Option<Uuid>,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::shop::Entity",
        from = "Column::ShopId",
        to = "super::shop::Column::Id"
    )]
    Shop,
    #[sea_orm(
        belongs_to = "super::tailor::Entity",
        from = "Column::AssignedTo",
        to = "super::tailor::Column::Id"
    )]
    AssignedTailor,
    #[sea_orm(has_many = "super::cloth::Entity")]
    Clothes,
    #[sea_orm(has_many = "super::cost::Entity")]
    Costs,
    #[sea_orm(has_many = "super::measurement::Entity")]
    Measurements,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl Related<super::cloth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clothes.def()
    }
}

impl Related<super::cost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Costs.def()
    }
}

impl Related<super::tailor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedTailor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
