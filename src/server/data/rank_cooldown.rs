//! Cooldown ledger repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::cooldown::{CreateCooldownParam, RankCooldown},
};

/// Repository for the cooldown ledger.
///
/// Records are append-only; several may exist for the same member and rank after
/// repeated promotions, and only the newest unexpired one matters.
pub struct RankCooldownRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankCooldownRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes a cooldown record.
    ///
    /// # Returns
    /// - `Ok(RankCooldown)` - The created record
    /// - `Err(AppError)` - Database error during insert
    pub async fn create(&self, param: CreateCooldownParam) -> Result<RankCooldown, AppError> {
        let entity = entity::rank_cooldown::ActiveModel {
            user_discord_id: ActiveValue::Set(param.user_id.to_string()),
            rank: ActiveValue::Set(param.rank),
            cooldown_until: ActiveValue::Set(param.cooldown_until),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        RankCooldown::from_entity(entity)
    }

    /// Finds the unexpired cooldown for a member at a rank that ends last.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `rank` - Rank prefix the member currently holds
    /// - `now` - Reference time; records ending at or before it are ignored
    ///
    /// # Returns
    /// - `Ok(Some(RankCooldown))` - Active cooldown found
    /// - `Ok(None)` - No active cooldown
    /// - `Err(AppError)` - Database error during query
    pub async fn find_active(
        &self,
        user_id: u64,
        rank: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<RankCooldown>, AppError> {
        let entity = entity::prelude::RankCooldown::find()
            .filter(entity::rank_cooldown::Column::UserDiscordId.eq(user_id.to_string()))
            .filter(entity::rank_cooldown::Column::Rank.eq(rank))
            .filter(entity::rank_cooldown::Column::CooldownUntil.gt(now))
            .order_by_desc(entity::rank_cooldown::Column::CooldownUntil)
            .one(self.db)
            .await?;

        entity.map(RankCooldown::from_entity).transpose()
    }

    /// Lists a member's unexpired cooldowns, soonest to end first.
    pub async fn find_active_by_user(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankCooldown>, AppError> {
        let entities = entity::prelude::RankCooldown::find()
            .filter(entity::rank_cooldown::Column::UserDiscordId.eq(user_id.to_string()))
            .filter(entity::rank_cooldown::Column::CooldownUntil.gt(now))
            .order_by_asc(entity::rank_cooldown::Column::CooldownUntil)
            .all(self.db)
            .await?;

        entities.into_iter().map(RankCooldown::from_entity).collect()
    }

    /// Deletes every cooldown a member holds at `rank`.
    ///
    /// Used when a member is demoted out of the rank.
    pub async fn delete_for_rank(&self, user_id: u64, rank: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::RankCooldown::delete_many()
            .filter(entity::rank_cooldown::Column::UserDiscordId.eq(user_id.to_string()))
            .filter(entity::rank_cooldown::Column::Rank.eq(rank))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every cooldown a member holds.
    pub async fn delete_by_user(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::RankCooldown::delete_many()
            .filter(entity::rank_cooldown::Column::UserDiscordId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes cooldowns that ended at or before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records purged
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::RankCooldown::delete_many()
            .filter(entity::rank_cooldown::Column::CooldownUntil.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
