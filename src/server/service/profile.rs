//! Read-only member profile assembled from every ranking table.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::RoleId;

use crate::server::{
    data::{
        rank_cooldown::RankCooldownRepository, rank_lock::RankLockRepository,
        user_profile::UserProfileRepository, verified_user::VerifiedUserRepository,
    },
    error::AppError,
    model::{
        cooldown::RankCooldown,
        rank::{Rank, RankRequirement, RankTable},
        rank_lock::RankLock,
        verification::VerifiedUser,
    },
};

/// Everything `/profile` shows about a member.
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub user_id: u64,
    pub rank: Option<Rank>,
    pub points: i32,
    /// Unexpired cooldown at the current rank.
    pub cooldown: Option<RankCooldown>,
    /// Lock at the current rank.
    pub lock: Option<RankLock>,
    pub next_rank: Option<Rank>,
    pub next_requirement: Option<RankRequirement>,
    pub verified: Option<VerifiedUser>,
}

impl MemberProfile {
    /// Points still missing for the next rank, zero once the requirement is met.
    pub fn points_needed(&self) -> i32 {
        self.next_requirement
            .map(|req| (req.min_points - self.points).max(0))
            .unwrap_or(0)
    }
}

pub struct ProfileService<'a> {
    db: &'a DatabaseConnection,
    ranks: &'a RankTable,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a DatabaseConnection, ranks: &'a RankTable) -> Self {
        Self { db, ranks }
    }

    /// Builds a member's profile.
    ///
    /// Members without a stored profile are shown with zero points rather than an error.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `member_roles` - Roles the member currently holds
    /// - `now` - Reference time for the cooldown lookup
    pub async fn get(
        &self,
        user_id: u64,
        member_roles: &[RoleId],
        now: DateTime<Utc>,
    ) -> Result<MemberProfile, AppError> {
        let rank = self.ranks.highest_held(member_roles).cloned();
        let points = UserProfileRepository::new(self.db)
            .get_points(user_id)
            .await?;

        let (cooldown, lock) = match &rank {
            Some(rank) => (
                RankCooldownRepository::new(self.db)
                    .find_active(user_id, &rank.prefix, now)
                    .await?,
                RankLockRepository::new(self.db)
                    .find(user_id, &rank.prefix)
                    .await?,
            ),
            None => (None, None),
        };

        let next_rank = rank
            .as_ref()
            .and_then(|rank| self.ranks.next_higher(&rank.prefix))
            .cloned();
        let next_requirement = next_rank
            .as_ref()
            .and_then(|next| self.ranks.requirement(&next.prefix))
            .copied();

        let verified = VerifiedUserRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await?;

        Ok(MemberProfile {
            user_id,
            rank,
            points,
            cooldown,
            lock,
            next_rank,
            next_requirement,
            verified,
        })
    }
}
