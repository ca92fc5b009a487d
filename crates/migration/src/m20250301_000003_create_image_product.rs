//! Create `image_product` table.
//!
//! Holds the base64 payload; each row belongs to exactly one product.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ImageProduct::Table)
                    .if_not_exists()
                    .col(uuid(ImageProduct::Id).primary_key())
                    .col(text(ImageProduct::ImageBase64).not_null())
                    .col(timestamp_with_time_zone(ImageProduct::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ImageProduct::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ImageProduct::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ImageProduct { Table, Id, ImageBase64, CreatedAt, UpdatedAt }
