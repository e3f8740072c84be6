use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RankLock::Table)
                    .if_not_exists()
                    .col(pk_auto(RankLock::Id))
                    .col(string(RankLock::UserDiscordId))
                    .col(string(RankLock::Rank))
                    .col(string(RankLock::Reason))
                    .col(string(RankLock::LockedBy))
                    .col(timestamp_with_time_zone(RankLock::CreatedAt))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_rank_lock_user_rank_unique")
                            .col(RankLock::UserDiscordId)
                            .col(RankLock::Rank),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RankLock::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RankLock {
    Table,
    Id,
    UserDiscordId,
    Rank,
    Reason,
    LockedBy,
    CreatedAt,
}
