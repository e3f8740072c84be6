//! Event hosting domain models.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// A hosted event, active until `end_time` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    /// Key into `BotConfig::event_types`.
    pub event_type: String,
    pub host_id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub points_awarded: Option<i32>,
    pub notes: Option<String>,
    pub image_link: Option<String>,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            event_type: entity.event_type,
            host_id: parse_u64_from_string(entity.host_discord_id)?,
            start_time: entity.start_time,
            end_time: entity.end_time,
            points_awarded: entity.points_awarded,
            notes: entity.notes,
            image_link: entity.image_link,
        })
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Attendance row recording the points a member earned from an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventParticipant {
    pub id: i32,
    pub event_id: i32,
    pub user_id: u64,
    pub points: i32,
}

impl EventParticipant {
    pub fn from_entity(entity: entity::event_participant::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: parse_u64_from_string(entity.user_discord_id)?,
            points: entity.points,
        })
    }
}

/// Parameters for starting an event.
#[derive(Debug, Clone)]
pub struct CreateEventParam {
    pub name: String,
    pub event_type: String,
    pub host_id: u64,
    pub start_time: DateTime<Utc>,
}

/// Parameters for closing an event.
#[derive(Debug, Clone)]
pub struct EndEventParam {
    pub event_id: i32,
    pub end_time: DateTime<Utc>,
    pub points_awarded: i32,
    pub notes: Option<String>,
    pub image_link: Option<String>,
}

/// Member credited when an event ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: u64,
    pub username: String,
}

/// Summary returned after an event is closed.
#[derive(Debug, Clone)]
pub struct EndedEvent {
    pub event: Event,
    pub participants: Vec<Participant>,
    pub points_per_participant: i32,
    pub duration: chrono::Duration,
}
