//! Rank cooldown factory for seeding the cooldown ledger.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating cooldown records.
///
/// Defaults to a cooldown that expires one day from now.
pub struct RankCooldownFactory<'a> {
    db: &'a DatabaseConnection,
    user_discord_id: String,
    rank: String,
    cooldown_until: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl<'a> RankCooldownFactory<'a> {
    /// Creates a new factory for the given user and rank prefix.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_discord_id` - Discord ID of the cooldown holder
    /// - `rank` - Rank prefix the cooldown applies to
    pub fn new(db: &'a DatabaseConnection, user_discord_id: &str, rank: &str) -> Self {
        let now = Utc::now();
        Self {
            db,
            user_discord_id: user_discord_id.to_string(),
            rank: rank.to_string(),
            cooldown_until: now + Duration::days(1),
            created_at: now,
        }
    }

    pub fn cooldown_until(mut self, cooldown_until: DateTime<Utc>) -> Self {
        self.cooldown_until = cooldown_until;
        self
    }

    /// Makes the record already expired by `ago`.
    pub fn expired(mut self, ago: Duration) -> Self {
        self.cooldown_until = Utc::now() - ago;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Inserts the cooldown into the database.
    pub async fn build(self) -> Result<entity::rank_cooldown::Model, DbErr> {
        entity::rank_cooldown::ActiveModel {
            user_discord_id: ActiveValue::Set(self.user_discord_id),
            rank: ActiveValue::Set(self.rank),
            cooldown_until: ActiveValue::Set(self.cooldown_until),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active cooldown for `user_discord_id` at `rank` expiring in one day.
pub async fn create_cooldown(
    db: &DatabaseConnection,
    user_discord_id: &str,
    rank: &str,
) -> Result<entity::rank_cooldown::Model, DbErr> {
    RankCooldownFactory::new(db, user_discord_id, rank)
        .build()
        .await
}
