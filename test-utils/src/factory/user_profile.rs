//! User profile factory for creating test point balances.

use crate::factory::helpers::{next_discord_id, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test user profiles with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let profile = UserProfileFactory::new(&db)
///     .discord_id("123456789012345678")
///     .points(125)
///     .build()
///     .await?;
/// ```
pub struct UserProfileFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    username: String,
    points: i32,
}

impl<'a> UserProfileFactory<'a> {
    /// Creates a new UserProfileFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: unique 18 digit ID
    /// - username: `"member{id}"`
    /// - points: `0`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            discord_id: next_discord_id(),
            username: format!("member{}", next_id()),
            points: 0,
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    /// Inserts the profile into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created profile entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_profile::Model, DbErr> {
        let now = Utc::now();
        entity::user_profile::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            points: ActiveValue::Set(self.points),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a profile with default values and zero points.
pub async fn create_profile(
    db: &DatabaseConnection,
) -> Result<entity::user_profile::Model, DbErr> {
    UserProfileFactory::new(db).build().await
}

/// Creates a profile for a specific Discord user holding the given balance.
pub async fn create_profile_with_points(
    db: &DatabaseConnection,
    discord_id: &str,
    points: i32,
) -> Result<entity::user_profile::Model, DbErr> {
    UserProfileFactory::new(db)
        .discord_id(discord_id)
        .points(points)
        .build()
        .await
}
