//! Event factory for creating hosted events.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating events.
///
/// Events are active (no end time) unless `ended()` is called.
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    event_type: String,
    host_discord_id: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    points_awarded: Option<i32>,
}

impl<'a> EventFactory<'a> {
    /// Creates a new factory for an event hosted by `host_discord_id`.
    ///
    /// Defaults:
    /// - name: `"Event {id}"`
    /// - event_type: `"patrol"`
    /// - start_time: one hour ago
    pub fn new(db: &'a DatabaseConnection, host_discord_id: &str) -> Self {
        Self {
            db,
            name: format!("Event {}", next_id()),
            event_type: "patrol".to_string(),
            host_discord_id: host_discord_id.to_string(),
            start_time: Utc::now() - Duration::hours(1),
            end_time: None,
            points_awarded: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    /// Marks the event as ended now with the given award.
    pub fn ended(mut self, points_awarded: i32) -> Self {
        self.end_time = Some(Utc::now());
        self.points_awarded = Some(points_awarded);
        self
    }

    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            name: ActiveValue::Set(self.name),
            event_type: ActiveValue::Set(self.event_type),
            host_discord_id: ActiveValue::Set(self.host_discord_id),
            start_time: ActiveValue::Set(self.start_time),
            end_time: ActiveValue::Set(self.end_time),
            points_awarded: ActiveValue::Set(self.points_awarded),
            notes: ActiveValue::Set(None),
            image_link: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active event of the default type hosted by `host_discord_id`.
pub async fn create_event(
    db: &DatabaseConnection,
    host_discord_id: &str,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db, host_discord_id).build().await
}
