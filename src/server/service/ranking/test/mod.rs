use crate::server::{
    data::rank_cooldown::RankCooldownRepository,
    error::AppError,
    model::ranking::{PromotionRequest, PromotionStatus, RankChangeOrder, RankMember},
    service::{
        audit_log::{AuditEntry, RankChangeKind},
        ranking::RankingService,
    },
    test_support::{
        config::ladder_config,
        fakes::{FakeRoleProvider, RecordingAuditLog, RoleCall},
    },
};
use chrono::{Duration, Utc};
use serenity::all::{RoleId, UserId};
use test_utils::{builder::TestBuilder, factory};

mod demote;

const MEMBER: u64 = 123456789012345678;
const MEMBER_ID: &str = "123456789012345678";
const EXECUTOR: u64 = 876543210987654321;

// Role IDs of the ladder ranks.
const CMD_ROLE: u64 = 1;
const LTT_ROLE: u64 = 3;
const JLT_ROLE: u64 = 4;

fn request(from_rank: Option<&str>, to_rank: &str) -> PromotionRequest {
    PromotionRequest {
        user_id: UserId::new(MEMBER),
        username: "recruit".to_string(),
        to_rank: to_rank.to_string(),
        from_rank: from_rank.map(str::to_string),
        executor_id: UserId::new(EXECUTOR),
        executor_name: "officer".to_string(),
        reason: None,
        bypass_cooldown: false,
        bypass_points: false,
    }
}

fn order(member_roles: &[u64], executor_rank: Option<&str>) -> RankChangeOrder {
    RankChangeOrder {
        member: RankMember {
            user_id: UserId::new(MEMBER),
            username: "recruit".to_string(),
            role_ids: member_roles.iter().map(|id| RoleId::new(*id)).collect(),
        },
        executor_id: UserId::new(EXECUTOR),
        executor_name: "officer".to_string(),
        executor_rank: executor_rank.map(str::to_string),
        reason: None,
    }
}
