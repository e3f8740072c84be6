use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerifiedUser::Table)
                    .if_not_exists()
                    .col(string(VerifiedUser::DiscordId).primary_key())
                    .col(big_integer_uniq(VerifiedUser::RobloxId))
                    .col(string(VerifiedUser::RobloxUsername))
                    .col(string(VerifiedUser::RobloxDisplayName))
                    .col(timestamp_with_time_zone(VerifiedUser::VerifiedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerifiedUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VerifiedUser {
    Table,
    DiscordId,
    RobloxId,
    RobloxUsername,
    RobloxDisplayName,
    VerifiedAt,
}
