//! Discord role and nickname mutations.
//!
//! Services never talk to the Discord HTTP API directly to change a member's roles.
//! They go through `RoleProvider`, which lets the ranking and linked role logic run
//! against a recording fake in tests.

use serenity::{
    all::{EditMember, GuildId, RoleId, UserId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::error::role::{is_missing_permissions, RoleError};

/// Role and nickname operations on guild members.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Grants `role_id` to `user_id`.
    ///
    /// # Returns
    /// - `Ok(())` - Role granted or already held
    /// - `Err(RoleError::PermissionDenied)` - Discord returned code 50013
    /// - `Err(RoleError::Discord)` - Any other failure
    async fn add_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: Option<&str>,
    ) -> Result<(), RoleError>;

    /// Removes `role_id` from `user_id`.
    async fn remove_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: Option<&str>,
    ) -> Result<(), RoleError>;

    /// Whether `user_id` currently holds `role_id`.
    async fn has_role(&self, user_id: UserId, role_id: RoleId) -> Result<bool, RoleError>;

    /// Every role `user_id` currently holds.
    async fn member_roles(&self, user_id: UserId) -> Result<Vec<RoleId>, RoleError>;

    async fn set_nickname(&self, user_id: UserId, nickname: &str) -> Result<(), RoleError>;
}

/// Role provider backed by the bot's Discord HTTP client.
pub struct SerenityRoleProvider {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl SerenityRoleProvider {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl RoleProvider for SerenityRoleProvider {
    async fn add_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: Option<&str>,
    ) -> Result<(), RoleError> {
        self.http
            .add_member_role(self.guild_id, user_id, role_id, reason)
            .await
            .map_err(|e| RoleError::from_serenity(e, role_id))
    }

    async fn remove_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: Option<&str>,
    ) -> Result<(), RoleError> {
        self.http
            .remove_member_role(self.guild_id, user_id, role_id, reason)
            .await
            .map_err(|e| RoleError::from_serenity(e, role_id))
    }

    async fn has_role(&self, user_id: UserId, role_id: RoleId) -> Result<bool, RoleError> {
        let member = self
            .http
            .get_member(self.guild_id, user_id)
            .await
            .map_err(|e| RoleError::from_serenity(e, role_id))?;

        Ok(member.roles.contains(&role_id))
    }

    async fn member_roles(&self, user_id: UserId) -> Result<Vec<RoleId>, RoleError> {
        let member = self
            .http
            .get_member(self.guild_id, user_id)
            .await
            .map_err(|e| RoleError::Discord(Box::new(e)))?;

        Ok(member.roles)
    }

    async fn set_nickname(&self, user_id: UserId, nickname: &str) -> Result<(), RoleError> {
        self.guild_id
            .edit_member(&self.http, user_id, EditMember::new().nickname(nickname))
            .await
            .map(|_| ())
            .map_err(|e| {
                if is_missing_permissions(&e) {
                    RoleError::NicknamePermissionDenied
                } else {
                    RoleError::Discord(Box::new(e))
                }
            })
    }
}
