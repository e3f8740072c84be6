//! Event repository.
//!
//! Generic over the connection so the event service can close an event inside the same
//! transaction that credits its participants.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::event::{CreateEventParam, EndEventParam, Event},
};

pub struct EventRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active event.
    ///
    /// # Returns
    /// - `Ok(Event)` - The created event with no end time
    /// - `Err(AppError)` - Database error during insert
    pub async fn create(&self, param: CreateEventParam) -> Result<Event, AppError> {
        let entity = entity::event::ActiveModel {
            name: ActiveValue::Set(param.name),
            event_type: ActiveValue::Set(param.event_type),
            host_discord_id: ActiveValue::Set(param.host_id.to_string()),
            start_time: ActiveValue::Set(param.start_time),
            end_time: ActiveValue::Set(None),
            points_awarded: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            image_link: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Event::from_entity(entity)
    }

    pub async fn find_by_id(&self, event_id: i32) -> Result<Option<Event>, AppError> {
        let entity = entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?;

        entity.map(Event::from_entity).transpose()
    }

    /// Finds the active event hosted by `host_id`.
    ///
    /// A host runs at most one active event; if older data violates that, the most
    /// recently started one is returned.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - Active event found
    /// - `Ok(None)` - Host has no active event
    /// - `Err(AppError)` - Database error during query
    pub async fn find_active(&self, host_id: u64) -> Result<Option<Event>, AppError> {
        let entity = entity::prelude::Event::find()
            .filter(entity::event::Column::HostDiscordId.eq(host_id.to_string()))
            .filter(entity::event::Column::EndTime.is_null())
            .order_by_desc(entity::event::Column::StartTime)
            .one(self.db)
            .await?;

        entity.map(Event::from_entity).transpose()
    }

    /// Hands an event over to a new host.
    ///
    /// # Returns
    /// - `Ok(Event)` - The event with its new host
    /// - `Err(AppError::NotFound)` - No event with that ID
    /// - `Err(AppError)` - Database error during update
    pub async fn transfer(&self, event_id: i32, new_host_id: u64) -> Result<Event, AppError> {
        let mut active = self.existing(event_id).await?;
        active.host_discord_id = ActiveValue::Set(new_host_id.to_string());

        let entity = active.update(self.db).await?;

        Event::from_entity(entity)
    }

    /// Closes an event, recording its end time, award and notes.
    ///
    /// # Returns
    /// - `Ok(Event)` - The closed event
    /// - `Err(AppError::NotFound)` - No event with that ID
    /// - `Err(AppError)` - Database error during update
    pub async fn end(&self, param: EndEventParam) -> Result<Event, AppError> {
        let mut active = self.existing(param.event_id).await?;
        active.end_time = ActiveValue::Set(Some(param.end_time));
        active.points_awarded = ActiveValue::Set(Some(param.points_awarded));
        active.notes = ActiveValue::Set(param.notes);
        active.image_link = ActiveValue::Set(param.image_link);

        let entity = active.update(self.db).await?;

        Event::from_entity(entity)
    }

    async fn existing(&self, event_id: i32) -> Result<entity::event::ActiveModel, AppError> {
        match entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?
        {
            Some(event) => Ok(event.into()),
            None => Err(AppError::NotFound(format!("Event {} not found", event_id))),
        }
    }
}
