use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Name))
                    .col(string(Event::EventType))
                    .col(string(Event::HostDiscordId))
                    .col(timestamp_with_time_zone(Event::StartTime))
                    .col(timestamp_with_time_zone_null(Event::EndTime))
                    .col(integer_null(Event::PointsAwarded))
                    .col(text_null(Event::Notes))
                    .col(string_null(Event::ImageLink))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Name,
    EventType,
    HostDiscordId,
    StartTime,
    EndTime,
    PointsAwarded,
    Notes,
    ImageLink,
}
