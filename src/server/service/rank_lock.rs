//! Administrative rank locks.

use sea_orm::DatabaseConnection;
use serenity::all::RoleId;

use crate::server::{
    data::rank_lock::RankLockRepository,
    error::AppError,
    model::{
        rank::RankTable,
        rank_lock::{CreateRankLockParam, RankLock},
    },
};

pub struct RankLockService<'a> {
    db: &'a DatabaseConnection,
    ranks: &'a RankTable,
}

impl<'a> RankLockService<'a> {
    pub fn new(db: &'a DatabaseConnection, ranks: &'a RankTable) -> Self {
        Self { db, ranks }
    }

    /// Locks a member at their current highest rank.
    ///
    /// # Returns
    /// - `Ok(RankLock)` - The new lock
    /// - `Err(AppError::BadRequest)` - Member holds no rank or is already locked there
    /// - `Err(AppError)` - Database error
    pub async fn lock(
        &self,
        user_id: u64,
        member_roles: &[RoleId],
        reason: &str,
        locked_by: u64,
    ) -> Result<RankLock, AppError> {
        let Some(rank) = self.ranks.highest_held(member_roles) else {
            return Err(AppError::BadRequest("User has no rank.".to_string()));
        };

        let repo = RankLockRepository::new(self.db);
        if repo.find(user_id, &rank.prefix).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "User is already locked at rank {}",
                rank.prefix
            )));
        }

        let lock = repo
            .create(CreateRankLockParam {
                user_id,
                rank: rank.prefix.clone(),
                reason: reason.to_string(),
                locked_by,
            })
            .await?;

        tracing::info!("{} locked {} at rank {}", locked_by, user_id, rank.prefix);

        Ok(lock)
    }

    /// Removes the lock at a member's current highest rank.
    ///
    /// # Returns
    /// - `Ok(String)` - Prefix of the rank that was unlocked
    /// - `Err(AppError::BadRequest)` - Member holds no rank
    /// - `Err(AppError::NotFound)` - Member is not locked at their rank
    pub async fn unlock(&self, user_id: u64, member_roles: &[RoleId]) -> Result<String, AppError> {
        let Some(rank) = self.ranks.highest_held(member_roles) else {
            return Err(AppError::BadRequest("User has no rank.".to_string()));
        };

        let removed = RankLockRepository::new(self.db)
            .delete(user_id, &rank.prefix)
            .await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "User is not locked at rank {}",
                rank.prefix
            )));
        }

        tracing::info!("Unlocked {} at rank {}", user_id, rank.prefix);

        Ok(rank.prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::config::{bot_config, SGT_ROLE};
    use test_utils::builder::TestBuilder;

    /// Tests the lock and unlock cycle at the member's current rank.
    ///
    /// Expected: lock created at SGT, second lock rejected, unlock removes it
    #[tokio::test]
    async fn locks_and_unlocks_current_rank() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::RankLock)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let config = bot_config();
        let roles = [RoleId::new(SGT_ROLE)];

        let service = RankLockService::new(db, &config.ranks);
        let lock = service
            .lock(123456789012345678, &roles, "Inactivity", 1)
            .await?;
        assert_eq!(lock.rank, "SGT");

        assert!(matches!(
            service.lock(123456789012345678, &roles, "Again", 1).await,
            Err(AppError::BadRequest(_))
        ));

        assert_eq!(service.unlock(123456789012345678, &roles).await?, "SGT");
        assert!(matches!(
            service.unlock(123456789012345678, &roles).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    /// Tests locking a member with no rank.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn rejects_unranked_member() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::RankLock)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let config = bot_config();

        let service = RankLockService::new(db, &config.ranks);

        assert!(matches!(
            service.lock(123456789012345678, &[], "Reason", 1).await,
            Err(AppError::BadRequest(_))
        ));

        Ok(())
    }
}
