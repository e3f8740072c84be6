//! Rank lock repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::rank_lock::{CreateRankLockParam, RankLock},
};

pub struct RankLockRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankLockRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a rank lock.
    ///
    /// # Returns
    /// - `Ok(RankLock)` - The created lock
    /// - `Err(AppError)` - Database error during insert
    pub async fn create(&self, param: CreateRankLockParam) -> Result<RankLock, AppError> {
        let entity = entity::rank_lock::ActiveModel {
            user_discord_id: ActiveValue::Set(param.user_id.to_string()),
            rank: ActiveValue::Set(param.rank),
            reason: ActiveValue::Set(param.reason),
            locked_by: ActiveValue::Set(param.locked_by.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        RankLock::from_entity(entity)
    }

    /// Finds the lock holding a member at `rank`.
    ///
    /// # Returns
    /// - `Ok(Some(RankLock))` - The member is locked at this rank
    /// - `Ok(None)` - No lock
    /// - `Err(AppError)` - Database error during query
    pub async fn find(&self, user_id: u64, rank: &str) -> Result<Option<RankLock>, AppError> {
        let entity = entity::prelude::RankLock::find()
            .filter(entity::rank_lock::Column::UserDiscordId.eq(user_id.to_string()))
            .filter(entity::rank_lock::Column::Rank.eq(rank))
            .order_by_desc(entity::rank_lock::Column::CreatedAt)
            .one(self.db)
            .await?;

        entity.map(RankLock::from_entity).transpose()
    }

    /// Gets every lock a member holds, newest first.
    pub async fn find_by_user(&self, user_id: u64) -> Result<Vec<RankLock>, AppError> {
        let entities = entity::prelude::RankLock::find()
            .filter(entity::rank_lock::Column::UserDiscordId.eq(user_id.to_string()))
            .order_by_desc(entity::rank_lock::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(RankLock::from_entity).collect()
    }

    /// Removes the lock holding a member at `rank`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of locks removed; 0 when the member was not locked
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, user_id: u64, rank: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::RankLock::delete_many()
            .filter(entity::rank_lock::Column::UserDiscordId.eq(user_id.to_string()))
            .filter(entity::rank_lock::Column::Rank.eq(rank))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_user(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::RankLock::delete_many()
            .filter(entity::rank_lock::Column::UserDiscordId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
