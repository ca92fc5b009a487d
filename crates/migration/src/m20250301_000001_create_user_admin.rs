//! Create `user_admin` table.
//!
//! Staff accounts that own categories and products.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAdmin::Table)
                    .if_not_exists()
                    .col(uuid(UserAdmin::Id).primary_key())
                    .col(string_len(UserAdmin::Email, 255).unique_key().not_null())
                    .col(string_len(UserAdmin::FullName, 128).not_null())
                    .col(text(UserAdmin::PasswordHash).not_null())
                    .col(timestamp_with_time_zone(UserAdmin::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserAdmin::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserAdmin { Table, Id, Email, FullName, PasswordHash, CreatedAt }
