use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Cooldown ledger entry written after a promotion into a rank with a cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct RankCooldown {
    pub id: i32,
    pub user_id: u64,
    /// Rank prefix the cooldown applies to.
    pub rank: String,
    pub cooldown_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RankCooldown {
    /// Converts an entity model to a cooldown domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(RankCooldown)` - The converted model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored user ID is not numeric
    pub fn from_entity(entity: entity::rank_cooldown::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: parse_u64_from_string(entity.user_discord_id)?,
            rank: entity.rank,
            cooldown_until: entity.cooldown_until,
            created_at: entity.created_at,
        })
    }

    /// Time left until the cooldown expires, zero once it has passed.
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::Duration {
        (self.cooldown_until - now).max(chrono::Duration::zero())
    }
}

/// Parameters for writing a cooldown.
#[derive(Debug, Clone)]
pub struct CreateCooldownParam {
    pub user_id: u64,
    pub rank: String,
    pub cooldown_until: DateTime<Utc>,
}
