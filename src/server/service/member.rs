//! Cleanup of per-member data when a member leaves the guild.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        oauth_state::OauthStateRepository, rank_cooldown::RankCooldownRepository,
        rank_lock::RankLockRepository, user_profile::UserProfileRepository,
        verified_user::VerifiedUserRepository,
    },
    error::AppError,
};

/// Rows removed for a departed member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberCleanup {
    pub cooldowns: u64,
    pub rank_locks: u64,
    pub verified_links: u64,
    pub oauth_states: u64,
    pub profiles: u64,
}

impl MemberCleanup {
    pub fn total(&self) -> u64 {
        self.cooldowns + self.rank_locks + self.verified_links + self.oauth_states + self.profiles
    }
}

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deletes every record held for `user_id`.
    ///
    /// Event participation rows are kept so past event totals stay intact.
    ///
    /// # Returns
    /// - `Ok(MemberCleanup)` - Number of rows removed per table
    /// - `Err(AppError::DbErr)` - A delete failed; earlier deletes are not rolled back
    pub async fn remove_member_data(&self, user_id: u64) -> Result<MemberCleanup, AppError> {
        let cleanup = MemberCleanup {
            cooldowns: RankCooldownRepository::new(self.db)
                .delete_by_user(user_id)
                .await?,
            rank_locks: RankLockRepository::new(self.db)
                .delete_by_user(user_id)
                .await?,
            verified_links: VerifiedUserRepository::new(self.db)
                .delete(user_id)
                .await?,
            oauth_states: OauthStateRepository::new(self.db)
                .delete_by_user(user_id)
                .await?,
            profiles: UserProfileRepository::new(self.db)
                .delete(user_id)
                .await?,
        };

        tracing::info!(
            "Removed {} records for departed member {}",
            cleanup.total(),
            user_id
        );

        Ok(cleanup)
    }
}
