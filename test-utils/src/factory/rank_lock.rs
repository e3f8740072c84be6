//! Rank lock factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating rank locks.
pub struct RankLockFactory<'a> {
    db: &'a DatabaseConnection,
    user_discord_id: String,
    rank: String,
    reason: String,
    locked_by: String,
}

impl<'a> RankLockFactory<'a> {
    /// Creates a new factory for the given user and rank prefix.
    ///
    /// Defaults:
    /// - reason: `"Pending review"`
    /// - locked_by: `"1"`
    pub fn new(db: &'a DatabaseConnection, user_discord_id: &str, rank: &str) -> Self {
        Self {
            db,
            user_discord_id: user_discord_id.to_string(),
            rank: rank.to_string(),
            reason: "Pending review".to_string(),
            locked_by: "1".to_string(),
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn locked_by(mut self, locked_by: impl Into<String>) -> Self {
        self.locked_by = locked_by.into();
        self
    }

    pub async fn build(self) -> Result<entity::rank_lock::Model, DbErr> {
        entity::rank_lock::ActiveModel {
            user_discord_id: ActiveValue::Set(self.user_discord_id),
            rank: ActiveValue::Set(self.rank),
            reason: ActiveValue::Set(self.reason),
            locked_by: ActiveValue::Set(self.locked_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a lock for `user_discord_id` at `rank` with the default reason.
pub async fn create_rank_lock(
    db: &DatabaseConnection,
    user_discord_id: &str,
    rank: &str,
) -> Result<entity::rank_lock::Model, DbErr> {
    RankLockFactory::new(db, user_discord_id, rank).build().await
}
