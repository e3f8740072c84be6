//! Rank promotion and demotion engine.
//!
//! A promotion passes three checks before anything changes: the permission gate
//! (`gate::can_promote_to_rank`), which decides whether the executor's own rank
//! authorises the target rank; the validator (`validate`), which checks rank locks,
//! cooldowns and point requirements; and finally the executor (`promote`), which swaps
//! roles, writes the cooldown for the new rank and records an audit entry.
//!
//! Every outcome is a `PromotionResult` with a typed status. Database failures after a
//! role change are reported as `DatabaseError` for manual reconciliation rather than
//! rolled back.

pub mod demote;
pub mod gate;
pub mod promote;
pub mod validate;

#[cfg(test)]
mod test;

use sea_orm::DatabaseConnection;
use serenity::all::UserId;

use crate::server::{
    model::{rank::RankTable, ranking::rank_nickname},
    service::{audit_log::AuditLog, role_provider::RoleProvider},
};

pub struct RankingService<'a> {
    db: &'a DatabaseConnection,
    ranks: &'a RankTable,
    roles: &'a dyn RoleProvider,
    audit: &'a dyn AuditLog,
}

impl<'a> RankingService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        ranks: &'a RankTable,
        roles: &'a dyn RoleProvider,
        audit: &'a dyn AuditLog,
    ) -> Self {
        Self {
            db,
            ranks,
            roles,
            audit,
        }
    }

    /// Sets the member's nickname to `[PFX] username`.
    ///
    /// Nickname failures never fail a rank change. Discord refuses to rename the guild
    /// owner and anyone above the bot, which is common for senior ranks.
    async fn update_nickname(&self, user_id: UserId, prefix: &str, username: &str) {
        let nickname = rank_nickname(prefix, username);

        if let Err(e) = self.roles.set_nickname(user_id, &nickname).await {
            tracing::warn!("Failed to set nickname of {} to {}: {}", user_id, nickname, e);
        }
    }
}
