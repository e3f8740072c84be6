//! User profile domain model.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Member profile holding the point balance.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub discord_id: u64,
    pub username: String,
    /// Point balance, never negative.
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Converts an entity model to a profile domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - The converted model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not numeric
    pub fn from_entity(entity: entity::user_profile::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            username: entity.username,
            points: entity.points,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}
