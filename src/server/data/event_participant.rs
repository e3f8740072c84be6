//! Event participant repository.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{error::AppError, model::event::EventParticipant};

pub struct EventParticipantRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventParticipantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records `points` for a member on an event, replacing any earlier value.
    ///
    /// # Returns
    /// - `Ok(EventParticipant)` - The created or updated row
    /// - `Err(AppError)` - Database error during lookup or write
    pub async fn upsert(
        &self,
        event_id: i32,
        user_id: u64,
        points: i32,
    ) -> Result<EventParticipant, AppError> {
        let existing = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .filter(entity::event_participant::Column::UserDiscordId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(participant) => {
                let mut active: entity::event_participant::ActiveModel = participant.into();
                active.points = ActiveValue::Set(points);
                active.update(self.db).await?
            }
            None => {
                entity::event_participant::ActiveModel {
                    event_id: ActiveValue::Set(event_id),
                    user_discord_id: ActiveValue::Set(user_id.to_string()),
                    points: ActiveValue::Set(points),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        EventParticipant::from_entity(entity)
    }

    /// Gets every participant of an event in insertion order.
    pub async fn get_by_event(&self, event_id: i32) -> Result<Vec<EventParticipant>, AppError> {
        let entities = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .order_by_asc(entity::event_participant::Column::Id)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(EventParticipant::from_entity)
            .collect()
    }

    /// Counts the events a member has been credited for.
    pub async fn count_by_user(&self, user_id: u64) -> Result<u64, AppError> {
        let count = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::UserDiscordId.eq(user_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count)
    }
}
