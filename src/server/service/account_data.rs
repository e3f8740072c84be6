//! Everything stored about a member, gathered for `/account-data`.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        event_participant::EventParticipantRepository, rank_cooldown::RankCooldownRepository,
        rank_lock::RankLockRepository, user_profile::UserProfileRepository,
        verified_user::VerifiedUserRepository,
    },
    error::AppError,
    model::{
        cooldown::RankCooldown, rank_lock::RankLock, user_profile::UserProfile,
        verification::VerifiedUser,
    },
};

#[derive(Debug, Clone)]
pub struct AccountData {
    pub profile: Option<UserProfile>,
    pub verified: Option<VerifiedUser>,
    pub events_attended: u64,
    /// Unexpired cooldowns, soonest first.
    pub cooldowns: Vec<RankCooldown>,
    pub locks: Vec<RankLock>,
}

impl AccountData {
    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.verified.is_none()
            && self.events_attended == 0
            && self.cooldowns.is_empty()
            && self.locks.is_empty()
    }
}

pub struct AccountDataService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountDataService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Collects the stored data of one member.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `now` - Reference time; expired cooldowns are left out
    pub async fn get(&self, user_id: u64, now: DateTime<Utc>) -> Result<AccountData, AppError> {
        Ok(AccountData {
            profile: UserProfileRepository::new(self.db)
                .find_by_discord_id(user_id)
                .await?,
            verified: VerifiedUserRepository::new(self.db)
                .find_by_discord_id(user_id)
                .await?,
            events_attended: EventParticipantRepository::new(self.db)
                .count_by_user(user_id)
                .await?,
            cooldowns: RankCooldownRepository::new(self.db)
                .find_active_by_user(user_id, now)
                .await?,
            locks: RankLockRepository::new(self.db).find_by_user(user_id).await?,
        })
    }
}
