//! Verification domain models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Link between a Discord account and a Roblox account.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedUser {
    pub discord_id: u64,
    pub roblox_id: i64,
    pub roblox_username: String,
    pub roblox_display_name: String,
    pub verified_at: DateTime<Utc>,
}

impl VerifiedUser {
    pub fn from_entity(entity: entity::verified_user::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            roblox_id: entity.roblox_id,
            roblox_username: entity.roblox_username,
            roblox_display_name: entity.roblox_display_name,
            verified_at: entity.verified_at,
        })
    }
}

/// Parameters for linking a Discord account to a Roblox account.
#[derive(Debug, Clone)]
pub struct UpsertVerifiedUserParam {
    pub discord_id: u64,
    pub roblox_id: i64,
    pub roblox_username: String,
    pub roblox_display_name: String,
}

/// Pending verification state token.
#[derive(Debug, Clone, PartialEq)]
pub struct OauthState {
    pub state_token: String,
    pub discord_id: u64,
    pub discord_user_tag: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl OauthState {
    pub fn from_entity(entity: entity::oauth_state::Model) -> Result<Self, AppError> {
        Ok(Self {
            state_token: entity.state_token,
            discord_id: parse_u64_from_string(entity.discord_id)?,
            discord_user_tag: entity.discord_user_tag,
            expires_at: entity.expires_at,
        })
    }
}

/// Subset of the Roblox `/oauth/v1/userinfo` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RobloxUserInfo {
    /// Roblox user ID as a decimal string.
    pub sub: String,
    pub preferred_username: String,
    /// Display name; Roblox omits it for some accounts.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Subset of the public Roblox `/v1/users/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RobloxUser {
    pub id: i64,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl RobloxUser {
    /// Same account in the shape the OAuth userinfo endpoint returns.
    pub fn into_user_info(self) -> RobloxUserInfo {
        RobloxUserInfo {
            sub: self.id.to_string(),
            preferred_username: self.name,
            nickname: Some(self.display_name),
        }
    }
}

/// Subset of the Discord `/users/@me` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordIdentity {
    pub id: String,
    pub username: String,
}
