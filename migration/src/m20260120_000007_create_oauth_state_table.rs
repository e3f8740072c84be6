use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OauthState::Table)
                    .if_not_exists()
                    .col(string(OauthState::StateToken).primary_key())
                    .col(string(OauthState::DiscordId))
                    .col(string_null(OauthState::DiscordUserTag))
                    .col(timestamp_with_time_zone(OauthState::ExpiresAt))
                    .col(timestamp_with_time_zone(OauthState::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthState::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OauthState {
    Table,
    StateToken,
    DiscordId,
    DiscordUserTag,
    ExpiresAt,
    CreatedAt,
}
