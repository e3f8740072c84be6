use chrono::Utc;

use crate::server::{
    data::rank_cooldown::RankCooldownRepository,
    model::{
        cooldown::CreateCooldownParam,
        ranking::{PromotionRequest, PromotionResult, PromotionStatus, RankChangeOrder},
    },
    service::{
        audit_log::{emit, AuditEntry, RankChangeKind},
        ranking::{gate::can_promote_to_rank, RankingService},
    },
};

impl<'a> RankingService<'a> {
    /// Validates and carries out a promotion.
    ///
    /// The executor's rank is not checked here; command handlers run the permission gate
    /// before building the request.
    ///
    /// # Returns
    /// - `PromotionResult` with `Success`, a validation failure, `InvalidRank` when the
    ///   target's cooldown cannot be represented, `RoleError` when Discord refused the new
    ///   role, or `DatabaseError` when the cooldown could not be written after the role
    ///   changed
    pub async fn promote(&self, request: &PromotionRequest) -> PromotionResult {
        let validation = self.validate(request).await;
        if !validation.is_success() {
            return validation;
        }

        self.execute(request).await
    }

    /// Promotes each request in turn.
    ///
    /// Earlier successes are kept when a later request fails.
    pub async fn promote_batch(&self, requests: &[PromotionRequest]) -> Vec<PromotionResult> {
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            results.push(self.promote(request).await);
        }

        results
    }

    /// Promotes a member one rank above their highest held rank.
    ///
    /// # Returns
    /// - `NoEligibleRank` - Member holds no rank or is already at the top
    /// - `Denied` - The executor's rank does not authorise the target rank
    /// - Otherwise the result of `promote`
    pub async fn promote_next(&self, order: &RankChangeOrder) -> PromotionResult {
        let member = &order.member;

        let Some(current) = self.ranks.highest_held(&member.role_ids) else {
            return PromotionResult::for_member(
                member.user_id,
                None,
                PromotionStatus::NoEligibleRank,
                "User has no rank.",
            );
        };

        let Some(target) = self.ranks.next_higher(&current.prefix) else {
            return PromotionResult::for_member(
                member.user_id,
                Some(current.prefix.clone()),
                PromotionStatus::NoEligibleRank,
                "User is already at maximum rank.",
            );
        };

        let request = PromotionRequest {
            user_id: member.user_id,
            username: member.username.clone(),
            to_rank: target.prefix.clone(),
            from_rank: Some(current.prefix.clone()),
            executor_id: order.executor_id,
            executor_name: order.executor_name.clone(),
            reason: order.reason.clone(),
            bypass_cooldown: false,
            bypass_points: false,
        };

        let check = can_promote_to_rank(self.ranks, order.executor_rank.as_deref(), &target.prefix);
        if !check.can_promote {
            return PromotionResult::for_request(
                &request,
                PromotionStatus::Denied,
                check
                    .reason
                    .unwrap_or_else(|| "You cannot promote to this rank".to_string()),
            );
        }

        self.promote(&request).await
    }

    /// Promotes several members one rank each, in order.
    pub async fn promote_next_many(&self, orders: &[RankChangeOrder]) -> Vec<PromotionResult> {
        let mut results = Vec::with_capacity(orders.len());

        for order in orders {
            results.push(self.promote_next(order).await);
        }

        results
    }

    /// Applies an already validated promotion.
    async fn execute(&self, request: &PromotionRequest) -> PromotionResult {
        let Some(target) = self.ranks.get(&request.to_rank) else {
            return PromotionResult::for_request(
                request,
                PromotionStatus::InvalidRank,
                format!("Invalid rank: {}", request.to_rank),
            );
        };
        let user_id = request.user_id;
        let reason = request.reason.as_deref();
        let now = Utc::now();

        // Resolved before any role changes so an unrepresentable cooldown cannot leave
        // the member half promoted.
        let cooldown = self
            .ranks
            .requirement(&target.prefix)
            .and_then(|requirement| requirement.cooldown());
        let cooldown_until = match cooldown {
            Some(cooldown) => match now.checked_add_signed(cooldown) {
                Some(until) => Some(until),
                None => {
                    tracing::error!(
                        "Cooldown of rank {} is out of range: {:?}",
                        target.prefix,
                        cooldown
                    );
                    return PromotionResult::for_request(
                        request,
                        PromotionStatus::InvalidRank,
                        format!("Rank {} has an invalid cooldown", target.prefix),
                    );
                }
            },
            None => None,
        };

        if let Some(current) = request.from_rank.as_deref().and_then(|p| self.ranks.get(p)) {
            match self.roles.has_role(user_id, current.role_id).await {
                Ok(true) => {
                    if let Err(e) = self.roles.remove_role(user_id, current.role_id, reason).await {
                        tracing::warn!(
                            "Failed to remove {} role from {}: {}",
                            current.prefix,
                            user_id,
                            e
                        );
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        "Failed to check {} role of {}: {}",
                        current.prefix,
                        user_id,
                        e
                    );
                }
            }
        }

        if let Err(e) = self.roles.add_role(user_id, target.role_id, reason).await {
            tracing::error!("Failed to add {} role to {}: {}", target.prefix, user_id, e);
            return PromotionResult::for_request(
                request,
                PromotionStatus::RoleError,
                format!("Failed to update roles: {}", e),
            );
        }

        if let Some(cooldown_until) = cooldown_until {
            let param = CreateCooldownParam {
                user_id: user_id.get(),
                rank: target.prefix.clone(),
                cooldown_until,
            };

            if let Err(e) = RankCooldownRepository::new(self.db).create(param).await {
                tracing::error!(
                    "Promoted {} to {} but failed to write cooldown: {}",
                    user_id,
                    target.prefix,
                    e
                );
                return PromotionResult::for_request(
                    request,
                    PromotionStatus::DatabaseError,
                    format!("Roles updated but failed to record cooldown: {}", e),
                );
            }
        }

        emit(
            self.audit,
            AuditEntry::RankChange {
                kind: RankChangeKind::Promotion,
                actor_id: request.executor_id,
                actor_name: request.executor_name.clone(),
                subject_id: user_id,
                subject_name: request.username.clone(),
                from_rank: request.from_rank.clone(),
                to_rank: target.prefix.clone(),
                reason: request.reason.clone(),
                timestamp: now,
            },
        )
        .await;

        self.update_nickname(user_id, &target.prefix, &request.username)
            .await;

        tracing::info!(
            "{} promoted {} from {} to {}",
            request.executor_name,
            request.username,
            request.from_rank.as_deref().unwrap_or("N/A"),
            target.prefix
        );

        PromotionResult::for_request(
            request,
            PromotionStatus::Success,
            format!(
                "Successfully promoted {} from {} to {}",
                request.username,
                request.from_rank.as_deref().unwrap_or("N/A"),
                target.prefix
            ),
        )
    }
}
