//! Database migrations for the onboarding tables

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_restaurant_submissions::Migration),
            Box::new(m20250601_000002_create_restaurant_children::Migration),
        ]
    }
}

mod m20250601_000001_create_restaurant_submissions {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000001_create_restaurant_submissions"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RestaurantSubmissions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RestaurantSubmissions::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RestaurantSubmissions::RestaurantName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RestaurantSubmissions::Address).string().not_null())
                        .col(ColumnDef::new(RestaurantSubmissions::Email).string().not_null())
                        .col(ColumnDef::new(RestaurantSubmissions::Phone).string())
                        .col(ColumnDef::new(RestaurantSubmissions::Website).string())
                        .col(ColumnDef::new(RestaurantSubmissions::FoundedYear).string())
                        .col(ColumnDef::new(RestaurantSubmissions::Story).text().not_null())
                        .col(ColumnDef::new(RestaurantSubmissions::OwnerQuote).text())
                        .col(ColumnDef::new(RestaurantSubmissions::AboutImageUrl).string())
                        .col(ColumnDef::new(RestaurantSubmissions::MenuPdfUrl).string())
                        .col(ColumnDef::new(RestaurantSubmissions::DeliveryAreas).text().not_null())
                        .col(ColumnDef::new(RestaurantSubmissions::DeliveryInstructions).text())
                        .col(ColumnDef::new(RestaurantSubmissions::Hours).text().not_null())
                        .col(ColumnDef::new(RestaurantSubmissions::Instagram).string())
                        .col(ColumnDef::new(RestaurantSubmissions::Facebook).string())
                        .col(ColumnDef::new(RestaurantSubmissions::Twitter).string())
                        .col(ColumnDef::new(RestaurantSubmissions::Comments).text())
                        .col(
                            ColumnDef::new(RestaurantSubmissions::Status)
                                .string()
                                .not_null()
                                .default("submitted"),
                        )
                        .col(ColumnDef::new(RestaurantSubmissions::GeneratedSiteUrl).string())
                        .col(
                            ColumnDef::new(RestaurantSubmissions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(RestaurantSubmissions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restaurant_submissions_created_at")
                        .table(RestaurantSubmissions::Table)
                        .col(RestaurantSubmissions::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restaurant_submissions_status")
                        .table(RestaurantSubmissions::Table)
                        .col(RestaurantSubmissions::Status)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RestaurantSubmissions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RestaurantSubmissions {
        Table,
        Id,
        RestaurantName,
        Address,
        Email,
        Phone,
        Website,
        FoundedYear,
        Story,
        OwnerQuote,
        AboutImageUrl,
        MenuPdfUrl,
        DeliveryAreas,
        DeliveryInstructions,
        Hours,
        Instagram,
        Facebook,
        Twitter,
        Comments,
        Status,
        GeneratedSiteUrl,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250601_000002_create_restaurant_children {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000002_create_restaurant_children"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RestaurantDishes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(RestaurantDishes::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(RestaurantDishes::RestaurantSubmissionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RestaurantDishes::Name).string().not_null())
                        .col(ColumnDef::new(RestaurantDishes::Description).text().not_null())
                        .col(ColumnDef::new(RestaurantDishes::ImageUrl).string())
                        .col(
                            ColumnDef::new(RestaurantDishes::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RestaurantDishes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_restaurant_dishes_submission")
                                .from(
                                    RestaurantDishes::Table,
                                    RestaurantDishes::RestaurantSubmissionId,
                                )
                                .to(RestaurantSubmissions::Table, RestaurantSubmissions::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RestaurantPhotos::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(RestaurantPhotos::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(RestaurantPhotos::RestaurantSubmissionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RestaurantPhotos::ImageUrl).string().not_null())
                        .col(
                            ColumnDef::new(RestaurantPhotos::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RestaurantPhotos::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_restaurant_photos_submission")
                                .from(
                                    RestaurantPhotos::Table,
                                    RestaurantPhotos::RestaurantSubmissionId,
                                )
                                .to(RestaurantSubmissions::Table, RestaurantSubmissions::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Detail reads fetch children by parent, ordered by display_order
            manager
                .create_index(
                    Index::create()
                        .name("idx_restaurant_dishes_submission_order")
                        .table(RestaurantDishes::Table)
                        .col(RestaurantDishes::RestaurantSubmissionId)
                        .col(RestaurantDishes::DisplayOrder)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_restaurant_photos_submission_order")
                        .table(RestaurantPhotos::Table)
                        .col(RestaurantPhotos::RestaurantSubmissionId)
                        .col(RestaurantPhotos::DisplayOrder)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RestaurantPhotos::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RestaurantDishes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RestaurantDishes {
        Table,
        Id,
        RestaurantSubmissionId,
        Name,
        Description,
        ImageUrl,
        DisplayOrder,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum RestaurantPhotos {
        Table,
        Id,
        RestaurantSubmissionId,
        ImageUrl,
        DisplayOrder,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum RestaurantSubmissions {
        Table,
        Id,
    }
}
