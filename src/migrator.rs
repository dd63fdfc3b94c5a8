use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_products_table::Migration),
            Box::new(m20250601_000002_create_categories_table::Migration),
            Box::new(m20250601_000003_create_product_categories_table::Migration),
            Box::new(m20250601_000004_create_move_history_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250601_000001_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Products::Description).string().null())
                        .col(ColumnDef::new(Products::ImageUrl).string().null())
                        .col(ColumnDef::new(Products::ProductCode).string().null())
                        .col(ColumnDef::new(Products::QrCode).string().null())
                        .col(ColumnDef::new(Products::BoxNo).integer().not_null())
                        .col(ColumnDef::new(Products::RowNo).integer().not_null())
                        .col(ColumnDef::new(Products::SlotNo).integer().not_null())
                        .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // One product per slot, enforced by the store itself rather
            // than by a check-then-write sequence.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uidx_products_location")
                        .table(Products::Table)
                        .col(Products::BoxNo)
                        .col(Products::RowNo)
                        .col(Products::SlotNo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_qr_code")
                        .table(Products::Table)
                        .col(Products::QrCode)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_product_code")
                        .table(Products::Table)
                        .col(Products::ProductCode)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
        Name,
        Description,
        ImageUrl,
        ProductCode,
        QrCode,
        BoxNo,
        RowNo,
        SlotNo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250601_000002_create_categories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000002_create_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Categories::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Categories::Color).string_len(16).not_null())
                        .col(ColumnDef::new(Categories::Icon).string_len(64).not_null())
                        .col(ColumnDef::new(Categories::Description).string().null())
                        .col(ColumnDef::new(Categories::Slug).string_len(64).not_null())
                        .col(ColumnDef::new(Categories::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Categories::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uidx_categories_slug")
                        .table(Categories::Table)
                        .col(Categories::Slug)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Categories {
        Table,
        Id,
        Name,
        Color,
        Icon,
        Description,
        Slug,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250601_000003_create_product_categories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000003_create_product_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductCategories::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::CategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ProductCategories::ProductId)
                                .col(ProductCategories::CategoryId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ProductCategories {
        Table,
        ProductId,
        CategoryId,
        CreatedAt,
    }
}

mod m20250601_000004_create_move_history_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000004_create_move_history_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // product_id is intentionally NOT a foreign key: history rows
            // outlive the products they reference.
            manager
                .create_table(
                    Table::create()
                        .table(MoveHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MoveHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MoveHistory::ProductId).uuid().null())
                        .col(
                            ColumnDef::new(MoveHistory::ProductName)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(ColumnDef::new(MoveHistory::FromBox).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::FromRow).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::FromSlot).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::ToBox).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::ToRow).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::ToSlot).integer().not_null())
                        .col(ColumnDef::new(MoveHistory::MovedAt).timestamp().not_null())
                        .col(ColumnDef::new(MoveHistory::MovedBy).string().null())
                        .col(ColumnDef::new(MoveHistory::Notes).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_move_history_moved_at")
                        .table(MoveHistory::Table)
                        .col(MoveHistory::MovedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_move_history_product_id")
                        .table(MoveHistory::Table)
                        .col(MoveHistory::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MoveHistory::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum MoveHistory {
        Table,
        Id,
        ProductId,
        ProductName,
        FromBox,
        FromRow,
        FromSlot,
        ToBox,
        ToRow,
        ToSlot,
        MovedAt,
        MovedBy,
        Notes,
    }
}
