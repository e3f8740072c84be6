use chrono::Utc;

use crate::server::{
    data::{rank_cooldown::RankCooldownRepository, rank_lock::RankLockRepository},
    model::ranking::{PromotionResult, PromotionStatus, RankChangeOrder},
    service::{
        audit_log::{emit, AuditEntry, RankChangeKind},
        ranking::{gate::can_promote_to_rank, RankingService},
    },
};

pub const DEFAULT_DEMOTION_REASON: &str = "No reason provided.";

impl<'a> RankingService<'a> {
    /// Moves a member one rank below their highest held rank.
    ///
    /// The executor must be allowed to promote into the rank the member lands in. A
    /// rank lock on the current rank blocks demotion as well as promotion. Cooldowns for
    /// the rank being left are cleared; the cooldown of the lower rank, if still running,
    /// keeps applying to the member's next promotion.
    ///
    /// # Returns
    /// - `Success` - Roles swapped and audit entry recorded
    /// - `NoEligibleRank` - Member holds no rank or is already at the bottom
    /// - `Denied` - The executor's rank does not authorise the target rank
    /// - `RankLocked` - Member is locked at their current rank
    /// - `DatabaseError` - Lock lookup or cooldown deletion failed
    /// - `RoleError` - Discord refused the role swap
    pub async fn demote(&self, order: &RankChangeOrder) -> PromotionResult {
        let member = &order.member;
        let user_id = member.user_id;

        let Some(current) = self.ranks.highest_held(&member.role_ids) else {
            return PromotionResult::for_member(
                user_id,
                None,
                PromotionStatus::NoEligibleRank,
                "User has no rank.",
            );
        };
        let from_rank = Some(current.prefix.clone());

        let Some(target) = self.ranks.next_lower(&current.prefix) else {
            return PromotionResult::for_member(
                user_id,
                from_rank,
                PromotionStatus::NoEligibleRank,
                "User is already at minimum rank.",
            );
        };

        let result = |status, message: String| {
            let mut result = PromotionResult::for_member(user_id, from_rank.clone(), status, message);
            result.to_rank = Some(target.prefix.clone());
            result
        };

        let check = can_promote_to_rank(self.ranks, order.executor_rank.as_deref(), &target.prefix);
        if !check.can_promote {
            return result(
                PromotionStatus::Denied,
                check
                    .reason
                    .unwrap_or_else(|| "You cannot demote this member".to_string()),
            );
        }

        match RankLockRepository::new(self.db)
            .find(user_id.get(), &current.prefix)
            .await
        {
            Ok(Some(lock)) => {
                let mut locked = result(
                    PromotionStatus::RankLocked,
                    format!("User is locked at rank {}", current.prefix),
                );
                locked.lock_reason = Some(lock.reason);
                return locked;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to check rank lock of {}: {}", user_id, e);
                return result(
                    PromotionStatus::DatabaseError,
                    format!("Failed to check rank lock: {}", e),
                );
            }
        }

        if let Err(e) = RankCooldownRepository::new(self.db)
            .delete_for_rank(user_id.get(), &current.prefix)
            .await
        {
            tracing::error!(
                "Failed to clear {} cooldowns of {}: {}",
                current.prefix,
                user_id,
                e
            );
            return result(
                PromotionStatus::DatabaseError,
                format!("Failed to clear cooldowns: {}", e),
            );
        }

        let reason = order
            .reason
            .clone()
            .unwrap_or_else(|| DEFAULT_DEMOTION_REASON.to_string());

        if let Err(e) = self
            .roles
            .remove_role(user_id, current.role_id, Some(&reason))
            .await
        {
            tracing::error!("Failed to remove {} role from {}: {}", current.prefix, user_id, e);
            return result(
                PromotionStatus::RoleError,
                format!("Failed to update roles: {}", e),
            );
        }

        if let Err(e) = self
            .roles
            .add_role(user_id, target.role_id, Some(&reason))
            .await
        {
            tracing::error!("Failed to add {} role to {}: {}", target.prefix, user_id, e);
            return result(
                PromotionStatus::RoleError,
                format!("Failed to update roles: {}", e),
            );
        }

        emit(
            self.audit,
            AuditEntry::RankChange {
                kind: RankChangeKind::Demotion,
                actor_id: order.executor_id,
                actor_name: order.executor_name.clone(),
                subject_id: user_id,
                subject_name: member.username.clone(),
                from_rank: from_rank.clone(),
                to_rank: target.prefix.clone(),
                reason: Some(reason),
                timestamp: Utc::now(),
            },
        )
        .await;

        self.update_nickname(user_id, &target.prefix, &member.username)
            .await;

        tracing::info!(
            "{} demoted {} from {} to {}",
            order.executor_name,
            member.username,
            current.prefix,
            target.prefix
        );

        result(
            PromotionStatus::Success,
            format!(
                "Successfully demoted {} from {} to {}",
                member.username, current.prefix, target.prefix
            ),
        )
    }
}
