use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RankCooldown::Table)
                    .if_not_exists()
                    .col(pk_auto(RankCooldown::Id))
                    .col(string(RankCooldown::UserDiscordId))
                    .col(string(RankCooldown::Rank))
                    .col(timestamp_with_time_zone(RankCooldown::CooldownUntil))
                    .col(timestamp_with_time_zone(RankCooldown::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rank_cooldown_user_rank")
                    .table(RankCooldown::Table)
                    .col(RankCooldown::UserDiscordId)
                    .col(RankCooldown::Rank)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RankCooldown::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RankCooldown {
    Table,
    Id,
    UserDiscordId,
    Rank,
    CooldownUntil,
    CreatedAt,
}
