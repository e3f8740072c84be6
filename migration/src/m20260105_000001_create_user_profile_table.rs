use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(string(UserProfile::DiscordId).primary_key())
                    .col(string(UserProfile::Username))
                    .col(integer(UserProfile::Points).default(0))
                    .col(timestamp_with_time_zone(UserProfile::CreatedAt))
                    .col(timestamp_with_time_zone(UserProfile::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserProfile {
    Table,
    DiscordId,
    Username,
    Points,
    CreatedAt,
    UpdatedAt,
}
