//! Verified user factory for Discord to Roblox links.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating verification links.
pub struct VerifiedUserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    roblox_id: i64,
    roblox_username: String,
}

impl<'a> VerifiedUserFactory<'a> {
    /// Creates a new factory linking `discord_id` to a fresh Roblox account.
    ///
    /// Defaults:
    /// - roblox_id: unique counter value
    /// - roblox_username: `"roblox{id}"`
    pub fn new(db: &'a DatabaseConnection, discord_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: discord_id.to_string(),
            roblox_id: id as i64,
            roblox_username: format!("roblox{}", id),
        }
    }

    pub fn roblox_id(mut self, roblox_id: i64) -> Self {
        self.roblox_id = roblox_id;
        self
    }

    pub fn roblox_username(mut self, roblox_username: impl Into<String>) -> Self {
        self.roblox_username = roblox_username.into();
        self
    }

    pub async fn build(self) -> Result<entity::verified_user::Model, DbErr> {
        entity::verified_user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            roblox_id: ActiveValue::Set(self.roblox_id),
            roblox_display_name: ActiveValue::Set(self.roblox_username.clone()),
            roblox_username: ActiveValue::Set(self.roblox_username),
            verified_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a link for `discord_id` with a generated Roblox account.
pub async fn create_verified_user(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<entity::verified_user::Model, DbErr> {
    VerifiedUserFactory::new(db, discord_id).build().await
}
