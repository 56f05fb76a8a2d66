use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users_table::Migration),
            Box::new(m20240301_000002_create_shops_table::Migration),
            Box::new(m20240301_000003_create_customers_table::Migration),
            Box::new(m20240301_000004_create_tailors_table::Migration),
            Box::new(m20240301_000005_create_orders_table::Migration),
            Box::new(m20240301_000006_create_clothes_table::Migration),
            Box::new(m20240301_000007_create_measurements_table::Migration),
            Box::new(m20240301_000008_create_costs_table::Migration),
            Box::new(m20240301_000009_create_payments_table::Migration),
        ]
    }
}

mod m20240301_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Users::MobileNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Name).string().null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(ColumnDef::new(Users::Language).string().null())
                        .col(ColumnDef::new(Users::Otp).string().null())
                        .col(ColumnDef::new(Users::OtpExpiresAt).timestamp().null())
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Users {
        Table,
        Id,
        MobileNumber,
        Name,
        Role,
        Language,
        Otp,
        OtpExpiresAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_shops_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_shops_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Shops::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Shops::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Shops::OwnerId).uuid().not_null())
                        .col(ColumnDef::new(Shops::Name).string().not_null())
                        .col(
                            ColumnDef::new(Shops::MobileNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Shops::Address).string().null())
                        .col(ColumnDef::new(Shops::DeletedAt).timestamp().null())
                        .col(ColumnDef::new(Shops::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Shops::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shops_owner_id")
                        .table(Shops::Table)
                        .col(Shops::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Shops::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Shops {
        Table,
        Id,
        OwnerId,
        Name,
        MobileNumber,
        Address,
        DeletedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000003_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::ShopId).uuid().not_null())
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::MobileNumber).string().not_null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::DeletedAt).timestamp().null())
                        .col(ColumnDef::new(Customers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Customers::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_customers_shop_id")
                        .table(Customers::Table)
                        .col(Customers::ShopId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Customers {
        Table,
        Id,
        ShopId,
        Name,
        MobileNumber,
        Address,
        DeletedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000004_create_tailors_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_tailors_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tailors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Tailors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Tailors::ShopId).uuid().not_null())
                        .col(ColumnDef::new(Tailors::Name).string().not_null())
                        .col(ColumnDef::new(Tailors::MobileNumber).string().not_null())
                        .col(
                            ColumnDef::new(Tailors::Status)
                                .string()
                                .not_null()
                                .default("INACTIVE"),
                        )
                        .col(ColumnDef::new(Tailors::DeletedAt).timestamp().null())
                        .col(ColumnDef::new(Tailors::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Tailors::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tailors_shop_id")
                        .table(Tailors::Table)
                        .col(Tailors::ShopId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tailors::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Tailors {
        Table,
        Id,
        ShopId,
        Name,
        MobileNumber,
        Status,
        DeletedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000005_create_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::ShopId).uuid().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::OrderType).string().not_null())
                        .col(ColumnDef::new(Orders::OrderDate).timestamp().not_null())
                        .col(ColumnDef::new(Orders::DeliveryDate).timestamp().null())
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::AlterationPrice).decimal().null())
                        .col(ColumnDef::new(Orders::AssignedTo).uuid().null())
                        .col(ColumnDef::new(Orders::Notes).string().null())
                        .col(ColumnDef::new(Orders::DeletedAt).timestamp().null())
                        .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_shop_id")
                        .table(Orders::Table)
                        .col(Orders::ShopId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Orders {
        Table,
        Id,
        CustomerId,
        ShopId,
        Status,
        OrderType,
        OrderDate,
        DeliveryDate,
        TotalAmount,
        AlterationPrice,
        AssignedTo,
        Notes,
        DeletedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000006_create_clothes_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000006_create_clothes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Clothes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clothes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Clothes::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Clothes::GarmentType).string().not_null())
                        .col(ColumnDef::new(Clothes::MaterialCost).decimal().null())
                        .col(ColumnDef::new(Clothes::Price).decimal().null())
                        .col(ColumnDef::new(Clothes::DesignNotes).string().null())
                        .col(ColumnDef::new(Clothes::ImageUrls).text().null())
                        .col(ColumnDef::new(Clothes::VideoUrls).text().null())
                        .col(ColumnDef::new(Clothes::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_clothes_order_id")
                        .table(Clothes::Table)
                        .col(Clothes::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clothes::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Clothes {
        Table,
        Id,
        OrderId,
        GarmentType,
        MaterialCost,
        Price,
        DesignNotes,
        ImageUrls,
        VideoUrls,
        CreatedAt,
    }
}

mod m20240301_000007_create_measurements_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000007_create_measurements_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Measurements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Measurements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Measurements::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Measurements::OrderId).uuid().null())
                        .col(ColumnDef::new(Measurements::ClothId).uuid().null())
                        .col(ColumnDef::new(Measurements::Chest).decimal().null())
                        .col(ColumnDef::new(Measurements::Waist).decimal().null())
                        .col(ColumnDef::new(Measurements::Hip).decimal().null())
                        .col(ColumnDef::new(Measurements::Shoulder).decimal().null())
                        .col(ColumnDef::new(Measurements::SleeveLength).decimal().null())
                        .col(ColumnDef::new(Measurements::TopLength).decimal().null())
                        .col(ColumnDef::new(Measurements::BottomLength).decimal().null())
                        .col(ColumnDef::new(Measurements::Neck).decimal().null())
                        .col(ColumnDef::new(Measurements::Inseam).decimal().null())
                        .col(ColumnDef::new(Measurements::Notes).string().null())
                        .col(
                            ColumnDef::new(Measurements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_measurements_customer_id")
                        .table(Measurements::Table)
                        .col(Measurements::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_measurements_order_id")
                        .table(Measurements::Table)
                        .col(Measurements::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Measurements::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Measurements {
        Table,
        Id,
        CustomerId,
        OrderId,
        ClothId,
        Chest,
        Waist,
        Hip,
        Shoulder,
        SleeveLength,
        TopLength,
        BottomLength,
        Neck,
        Inseam,
        Notes,
        CreatedAt,
    }
}

mod m20240301_000008_create_costs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000008_create_costs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Costs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Costs::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Costs::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Costs::MaterialCost).decimal().null())
                        .col(ColumnDef::new(Costs::LaborCost).decimal().null())
                        .col(ColumnDef::new(Costs::TotalCost).decimal().null())
                        .col(ColumnDef::new(Costs::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_costs_order_id")
                        .table(Costs::Table)
                        .col(Costs::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Costs::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Costs {
        Table,
        Id,
        OrderId,
        MaterialCost,
        LaborCost,
        TotalCost,
        CreatedAt,
    }
}

mod m20240301_000009_create_payments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000009_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Payments::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Payments::ShopId).uuid().not_null())
                        .col(
                            ColumnDef::new(Payments::OrderId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Payments::Amount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Payments::PaidAt).timestamp().not_null())
                        .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Payments::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_shop_paid_at")
                        .table(Payments::Table)
                        .col(Payments::ShopId)
                        .col(Payments::PaidAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Payments {
        Table,
        Id,
        ShopId,
        OrderId,
        Amount,
        PaidAt,
        CreatedAt,
        UpdatedAt,
    }
}
