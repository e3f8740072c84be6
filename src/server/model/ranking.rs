//! Promotion requests, results and gate decisions.

use chrono::Duration;
use regex::Regex;
use serenity::all::{RoleId, UserId};
use std::sync::LazyLock;

/// Outcome of a promotion, demotion or validation.
///
/// Every failure the ranking engine can produce is one of these variants; callers turn
/// them into user-facing text instead of handling errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStatus {
    Success,
    /// Target rank prefix does not exist.
    InvalidRank,
    /// An administrator pinned the member at their current rank.
    RankLocked,
    /// The member has not spent long enough in their current rank.
    CooldownActive,
    /// The member's point balance is below the target rank's minimum.
    InsufficientPoints,
    /// Discord refused the role change.
    RoleError,
    /// A database write failed after roles were already changed.
    DatabaseError,
    /// The executor's own rank does not authorise this change.
    Denied,
    /// There is no rank to move to: no current rank, or already at the top or bottom.
    NoEligibleRank,
}

impl PromotionStatus {
    /// Stable upper snake case code used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::InvalidRank => "INVALID_RANK",
            Self::RankLocked => "RANK_LOCKED",
            Self::CooldownActive => "COOLDOWN_ACTIVE",
            Self::InsufficientPoints => "INSUFFICIENT_POINTS",
            Self::RoleError => "ROLE_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::Denied => "DENIED",
            Self::NoEligibleRank => "NO_ELIGIBLE_RANK",
        }
    }
}

/// Request to move a member into `to_rank`.
///
/// Built per invocation by the command handlers and never persisted.
#[derive(Debug, Clone)]
pub struct PromotionRequest {
    /// Discord ID of the member being promoted.
    pub user_id: UserId,
    /// Username of the member, used for the nickname and logs.
    pub username: String,
    /// Rank prefix to promote into.
    pub to_rank: String,
    /// Rank prefix the member currently holds, if any.
    pub from_rank: Option<String>,
    pub executor_id: UserId,
    pub executor_name: String,
    pub reason: Option<String>,
    /// Skip the cooldown check, for administrative overrides.
    pub bypass_cooldown: bool,
    /// Skip the point requirement, for administrative overrides.
    pub bypass_points: bool,
}

/// Result of a ranking operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionResult {
    pub status: PromotionStatus,
    pub user_id: UserId,
    pub from_rank: Option<String>,
    pub to_rank: Option<String>,
    /// Human readable summary suitable for a command reply.
    pub message: String,
    /// Remaining cooldown when `status` is `CooldownActive`.
    pub cooldown_remaining: Option<Duration>,
    /// Point deficit when `status` is `InsufficientPoints`.
    pub points_needed: Option<i32>,
    /// Lock reason when `status` is `RankLocked`.
    pub lock_reason: Option<String>,
}

impl PromotionResult {
    /// Creates a result for `request` with no detail fields set.
    pub fn for_request(
        request: &PromotionRequest,
        status: PromotionStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            user_id: request.user_id,
            from_rank: request.from_rank.clone(),
            to_rank: Some(request.to_rank.clone()),
            message: message.into(),
            cooldown_remaining: None,
            points_needed: None,
            lock_reason: None,
        }
    }

    /// Creates a result for a member with no resolvable rank transition.
    pub fn for_member(
        user_id: UserId,
        from_rank: Option<String>,
        status: PromotionStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            user_id,
            from_rank,
            to_rank: None,
            message: message.into(),
            cooldown_remaining: None,
            points_needed: None,
            lock_reason: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PromotionStatus::Success
    }
}

/// Decision of the promotion ceiling check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCheck {
    pub can_promote: bool,
    /// Why the check failed.
    pub reason: Option<String>,
    /// Display name of the executor's ceiling rank when it was the cause of denial.
    pub max_rank: Option<String>,
}

impl PromotionCheck {
    pub fn allowed() -> Self {
        Self {
            can_promote: true,
            reason: None,
            max_rank: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            can_promote: false,
            reason: Some(reason.into()),
            max_rank: None,
        }
    }
}

/// A guild member as seen by the ranking engine.
#[derive(Debug, Clone)]
pub struct RankMember {
    pub user_id: UserId,
    pub username: String,
    pub role_ids: Vec<RoleId>,
}

impl RankMember {
    /// Builds a rank member from a serenity guild member.
    pub fn from_member(member: &serenity::all::Member) -> Self {
        Self {
            user_id: member.user.id,
            username: member.user.name.clone(),
            role_ids: member.roles.clone(),
        }
    }
}

/// A one-step rank change ordered by a staff member through a command.
///
/// The target rank is derived from the member's current rank: one step up for
/// promotions, one step down for demotions.
#[derive(Debug, Clone)]
pub struct RankChangeOrder {
    pub member: RankMember,
    pub executor_id: UserId,
    pub executor_name: String,
    /// Prefix of the executor's highest rank, `None` if they hold no rank role.
    pub executor_rank: Option<String>,
    pub reason: Option<String>,
}

/// Longest nickname Discord accepts.
pub const MAX_NICKNAME_LENGTH: usize = 32;

static RANK_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]+\]\s*").unwrap());

/// Removes a leading `[PFX] ` tag from a nickname.
pub fn strip_rank_prefix(nickname: &str) -> &str {
    match RANK_PREFIX_RE.find(nickname) {
        Some(found) => &nickname[found.end()..],
        None => nickname,
    }
}

/// Formats the nickname a member receives after a rank change.
///
/// Any existing rank tag on `name` is replaced rather than stacked. Names too long for
/// Discord are cut short and end in `...`.
pub fn rank_nickname(prefix: &str, name: &str) -> String {
    let base = strip_rank_prefix(name);
    let nickname = format!("[{}] {}", prefix, base);
    if nickname.chars().count() <= MAX_NICKNAME_LENGTH {
        return nickname;
    }

    let room = MAX_NICKNAME_LENGTH.saturating_sub(prefix.chars().count() + 3);
    let kept: String = base.chars().take(room.saturating_sub(3).max(1)).collect();

    format!("[{}] {}...", prefix, kept)
}
