use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Administrative pin holding a member at a rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankLock {
    pub id: i32,
    pub user_id: u64,
    pub rank: String,
    pub reason: String,
    /// Discord ID of the administrator who created the lock.
    pub locked_by: u64,
    pub created_at: DateTime<Utc>,
}

impl RankLock {
    pub fn from_entity(entity: entity::rank_lock::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: parse_u64_from_string(entity.user_discord_id)?,
            rank: entity.rank,
            reason: entity.reason,
            locked_by: parse_u64_from_string(entity.locked_by)?,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating a rank lock.
#[derive(Debug, Clone)]
pub struct CreateRankLockParam {
    pub user_id: u64,
    pub rank: String,
    pub reason: String,
    pub locked_by: u64,
}
