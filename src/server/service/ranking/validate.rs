use chrono::{DateTime, Utc};

use crate::server::{
    data::{
        rank_cooldown::RankCooldownRepository, rank_lock::RankLockRepository,
        user_profile::UserProfileRepository,
    },
    error::AppError,
    model::ranking::{PromotionRequest, PromotionResult, PromotionStatus},
    service::ranking::RankingService,
};

const MS_PER_HOUR: i64 = 3_600_000;

impl<'a> RankingService<'a> {
    /// Checks whether `request` may be carried out, without changing anything.
    ///
    /// Checks run in order and the first failure wins: the target rank must exist, the
    /// member must not be locked at their current rank, the current rank's cooldown must
    /// have elapsed (unless bypassed) and the member must have enough points for the
    /// target rank (unless bypassed).
    ///
    /// # Returns
    /// - `PromotionResult` with `Success` or the first failing status. Read failures are
    ///   reported as `DatabaseError`.
    pub async fn validate(&self, request: &PromotionRequest) -> PromotionResult {
        match self.check_requirements(request, Utc::now()).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    "Failed to validate promotion of {} to {}: {}",
                    request.user_id,
                    request.to_rank,
                    e
                );
                PromotionResult::for_request(
                    request,
                    PromotionStatus::DatabaseError,
                    format!("Failed to validate promotion: {}", e),
                )
            }
        }
    }

    async fn check_requirements(
        &self,
        request: &PromotionRequest,
        now: DateTime<Utc>,
    ) -> Result<PromotionResult, AppError> {
        let user_id = request.user_id.get();

        if !self.ranks.is_valid(&request.to_rank) {
            return Ok(PromotionResult::for_request(
                request,
                PromotionStatus::InvalidRank,
                format!("Invalid rank: {}", request.to_rank),
            ));
        }

        if let Some(current) = request.from_rank.as_deref() {
            if let Some(lock) = RankLockRepository::new(self.db).find(user_id, current).await? {
                let mut result = PromotionResult::for_request(
                    request,
                    PromotionStatus::RankLocked,
                    format!("User is locked at rank {}", current),
                );
                result.lock_reason = Some(lock.reason);
                return Ok(result);
            }

            if !request.bypass_cooldown {
                if let Some(cooldown) = RankCooldownRepository::new(self.db)
                    .find_active(user_id, current, now)
                    .await?
                {
                    let remaining = cooldown.remaining(now);
                    let ms = remaining.num_milliseconds();
                    let hours = (ms + MS_PER_HOUR - 1) / MS_PER_HOUR;

                    let mut result = PromotionResult::for_request(
                        request,
                        PromotionStatus::CooldownActive,
                        format!("Cooldown active. {} hours remaining", hours),
                    );
                    result.cooldown_remaining = Some(remaining);
                    return Ok(result);
                }
            }
        }

        if !request.bypass_points {
            let min_points = self
                .ranks
                .requirement(&request.to_rank)
                .map(|r| r.min_points)
                .unwrap_or(0);
            let points = UserProfileRepository::new(self.db)
                .get_points(user_id)
                .await?;

            if points < min_points {
                let needed = min_points - points;
                let mut result = PromotionResult::for_request(
                    request,
                    PromotionStatus::InsufficientPoints,
                    format!("Insufficient points. Need {} more points", needed),
                );
                result.points_needed = Some(needed);
                return Ok(result);
            }
        }

        Ok(PromotionResult::for_request(
            request,
            PromotionStatus::Success,
            "Promotion validated",
        ))
    }
}
