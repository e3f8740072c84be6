//! Roblox account verification through chained Discord and Roblox OAuth.
//!
//! `/verify` stores a single-use state token for the member and hands back a Discord
//! authorise link. The Discord callback proves the browser belongs to that member and
//! issues a second token for the Roblox leg; the Roblox callback links the two accounts.
//! Each state token is consumed on first use, so a callback can never be replayed.

use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use rand::RngCore;
use sea_orm::DatabaseConnection;
use serenity::all::{RoleId, UserId};
use url::Url;

use crate::server::{
    data::{
        oauth_state::OauthStateRepository, user_profile::UserProfileRepository,
        verified_user::VerifiedUserRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        rank::RankTable,
        ranking::MAX_NICKNAME_LENGTH,
        verification::{
            DiscordIdentity, OauthState, RobloxUser, RobloxUserInfo, UpsertVerifiedUserParam,
            VerifiedUser,
        },
    },
    service::role_provider::RoleProvider,
    state::OAuth2Client,
    util::parse::parse_u64_from_string,
};

/// Lifetime of a state token.
pub const STATE_TTL_MINUTES: i64 = 10;

/// Random bytes in a state token before hex encoding.
const STATE_TOKEN_BYTES: usize = 32;

pub const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";
pub const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";

pub const ROBLOX_AUTHORIZE_URL: &str = "https://apis.roblox.com/oauth/v1/authorize";
pub const ROBLOX_TOKEN_URL: &str = "https://apis.roblox.com/oauth/v1/token";
/// Public Roblox user lookup, used by manual verification.
pub const ROBLOX_USERS_URL: &str = "https://users.roblox.com/v1/users";
const ROBLOX_USERINFO_URL: &str = "https://apis.roblox.com/oauth/v1/userinfo";

type BasicToken = StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>;

/// Generates a state token of 32 random bytes, hex encoded.
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Roles touched once a member finishes verifying.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationRoles {
    /// Granted to every verified member.
    pub verified: Option<RoleId>,
    /// Removed from a member once verified.
    pub unverified: Option<RoleId>,
    /// Granted to verified members holding no rank role.
    pub unranked: Option<RoleId>,
}

/// Nickname applied after verification, `[PFX] Display Name` or just the display name
/// for unranked members.
///
/// # Returns
/// - `Some(String)` - Nickname within Discord's length limit
/// - `None` - The composed nickname would be too long
pub fn verified_nickname(rank_prefix: Option<&str>, display_name: &str) -> Option<String> {
    let nickname = match rank_prefix {
        Some(prefix) => format!("[{}] {}", prefix, display_name),
        None => display_name.to_string(),
    };

    (nickname.chars().count() <= MAX_NICKNAME_LENGTH).then_some(nickname)
}

/// Display name shown for a Roblox account, falling back to the username.
pub fn roblox_display_name(info: &RobloxUserInfo) -> String {
    info.nickname
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&info.preferred_username)
        .to_string()
}

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    discord_oauth: &'a OAuth2Client,
    roblox_oauth: &'a OAuth2Client,
}

impl<'a> VerificationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        discord_oauth: &'a OAuth2Client,
        roblox_oauth: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            discord_oauth,
            roblox_oauth,
        }
    }

    /// Starts verification for a member.
    ///
    /// # Arguments
    /// - `discord_id` - Member who ran `/verify`
    /// - `discord_user_tag` - Member's username, used when their profile is first created
    /// - `now` - Current time, the token expires `STATE_TTL_MINUTES` later
    ///
    /// # Returns
    /// - `Ok(Url)` - Discord authorise URL carrying the new state token
    /// - `Err(AppError)` - Database error storing the token
    pub async fn begin(
        &self,
        discord_id: u64,
        discord_user_tag: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Url, AppError> {
        let state = self
            .issue_state(discord_id, discord_user_tag, now)
            .await?;

        let (url, _) = self
            .discord_oauth
            .authorize_url(|| CsrfToken::new(state.state_token))
            .add_scope(Scope::new("identify".to_string()))
            .url();

        Ok(url)
    }

    /// Handles the redirect back from Discord.
    ///
    /// # Returns
    /// - `Ok(Url)` - Roblox authorise URL carrying a fresh state token
    /// - `Err(AuthError::InvalidState)` - Token unknown, used or expired
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the code
    /// - `Err(AuthError::AccountMismatch)` - A different Discord account authorised
    pub async fn discord_callback(
        &self,
        code: String,
        state_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Url, AppError> {
        let state = self.consume_state(state_token, now).await?;

        let token = self
            .discord_oauth
            .exchange_code(AuthorizationCode::new(code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let identity = self.fetch_discord_identity(&token).await?;
        check_discord_identity(&state, &identity)?;

        tracing::info!(
            "Discord identity confirmed for {} ({}), continuing to Roblox",
            identity.username,
            state.discord_id
        );

        let next = self
            .issue_state(state.discord_id, state.discord_user_tag, now)
            .await?;

        let (url, _) = self
            .roblox_oauth
            .authorize_url(|| CsrfToken::new(next.state_token))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url();

        Ok(url)
    }

    /// Handles the redirect back from Roblox and links the accounts.
    ///
    /// # Returns
    /// - `Ok(VerifiedUser)` - The stored link
    /// - `Err(AuthError::InvalidState)` - Token unknown, used or expired
    /// - `Err(AuthError::TokenExchange)` - Roblox rejected the code
    /// - `Err(AuthError::InvalidRobloxId)` - `sub` claim is not numeric
    /// - `Err(AuthError::RobloxAlreadyLinked)` - Roblox account belongs to another member
    pub async fn roblox_callback(
        &self,
        code: String,
        state_token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedUser, AppError> {
        let state = self.consume_state(state_token, now).await?;

        let token = self
            .roblox_oauth
            .exchange_code(AuthorizationCode::new(code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let info = self
            .http_client
            .get(ROBLOX_USERINFO_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<RobloxUserInfo>()
            .await?;

        self.link(state.discord_id, state.discord_user_tag.as_deref(), &info)
            .await
    }

    /// Links `discord_id` to the Roblox account in `info`.
    ///
    /// Creates the member's profile if they have none; an existing profile keeps its
    /// username and points.
    ///
    /// # Arguments
    /// - `discord_id` - Member being linked
    /// - `discord_user_tag` - Username stored on a newly created profile
    /// - `info` - Roblox account, `sub` holding the numeric user ID
    pub async fn link(
        &self,
        discord_id: u64,
        discord_user_tag: Option<&str>,
        info: &RobloxUserInfo,
    ) -> Result<VerifiedUser, AppError> {
        let roblox_id: i64 = info
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidRobloxId(info.sub.clone()))?;

        let verified_repo = VerifiedUserRepository::new(self.db);
        if let Some(existing) = verified_repo.find_by_roblox_id(roblox_id).await? {
            if existing.discord_id != discord_id {
                return Err(AuthError::RobloxAlreadyLinked { roblox_id }.into());
            }
        }

        let profile_repo = UserProfileRepository::new(self.db);
        if profile_repo.find_by_discord_id(discord_id).await?.is_none() {
            profile_repo
                .upsert(discord_id, discord_user_tag.unwrap_or("Unknown"))
                .await?;
        }

        let verified = verified_repo
            .upsert(UpsertVerifiedUserParam {
                discord_id,
                roblox_id,
                roblox_username: info.preferred_username.clone(),
                roblox_display_name: roblox_display_name(info),
            })
            .await?;

        tracing::info!(
            "Linked Discord user {} to Roblox account {} ({})",
            verified.discord_id,
            verified.roblox_username,
            verified.roblox_id
        );

        Ok(verified)
    }

    /// Links a member to a Roblox account by ID without OAuth, for staff use.
    ///
    /// # Returns
    /// - `Ok(VerifiedUser)` - The new link
    /// - `Err(AppError::BadRequest)` - The member is already verified; they must be
    ///   unverified first
    /// - `Err(AppError::NotFound)` - No Roblox user has this ID
    /// - `Err(AuthError::RobloxAlreadyLinked)` - Roblox account belongs to another member
    pub async fn manual_verify(
        &self,
        discord_id: u64,
        discord_user_tag: &str,
        roblox_id: i64,
    ) -> Result<VerifiedUser, AppError> {
        if let Some(existing) = VerifiedUserRepository::new(self.db)
            .find_by_discord_id(discord_id)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "{} is already verified as {} (@{}). Run /unverify on them first.",
                discord_user_tag, existing.roblox_display_name, existing.roblox_username
            )));
        }

        let response = self
            .http_client
            .get(format!("{}/{}", ROBLOX_USERS_URL, roblox_id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Could not find a Roblox user with ID {}",
                roblox_id
            )));
        }
        let user = response.error_for_status()?.json::<RobloxUser>().await?;

        self.link(discord_id, Some(discord_user_tag), &user.into_user_info())
            .await
    }

    /// Removes a member's verification link.
    ///
    /// # Returns
    /// - `Ok(true)` - A link existed and was removed
    /// - `Ok(false)` - The member was not verified
    pub async fn unverify(&self, discord_id: u64) -> Result<bool, AppError> {
        let removed = VerifiedUserRepository::new(self.db)
            .delete(discord_id)
            .await?;

        Ok(removed > 0)
    }

    async fn issue_state(
        &self,
        discord_id: u64,
        discord_user_tag: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<OauthState, AppError> {
        OauthStateRepository::new(self.db)
            .create(
                &generate_state_token(),
                discord_id,
                discord_user_tag,
                now + Duration::minutes(STATE_TTL_MINUTES),
            )
            .await
    }

    async fn consume_state(
        &self,
        state_token: &str,
        now: DateTime<Utc>,
    ) -> Result<OauthState, AppError> {
        OauthStateRepository::new(self.db)
            .consume(state_token, now)
            .await?
            .ok_or_else(|| AuthError::InvalidState.into())
    }

    async fn fetch_discord_identity(&self, token: &BasicToken) -> Result<DiscordIdentity, AppError> {
        let identity = self
            .http_client
            .get(DISCORD_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordIdentity>()
            .await?;

        Ok(identity)
    }
}

/// Ensures the Discord account that authorised is the one that ran `/verify`.
pub fn check_discord_identity(
    state: &OauthState,
    identity: &DiscordIdentity,
) -> Result<(), AppError> {
    let actual = parse_u64_from_string(identity.id.clone())?;

    if actual != state.discord_id {
        return Err(AuthError::AccountMismatch {
            expected: state.discord_id,
            actual,
        }
        .into());
    }

    Ok(())
}

/// Applies the member's new nickname and verification roles.
///
/// Every step is attempted independently and failures are only logged; the link is
/// already stored by the time this runs.
pub async fn apply_member_roles(
    roles: &dyn RoleProvider,
    ranks: &RankTable,
    verification_roles: VerificationRoles,
    verified: &VerifiedUser,
) {
    let user_id = UserId::new(verified.discord_id);

    let held = match roles.member_roles(user_id).await {
        Ok(held) => held,
        Err(e) => {
            tracing::error!(
                "Failed to fetch roles of verified member {}: {}",
                verified.discord_id,
                e
            );
            return;
        }
    };
    let rank = ranks.highest_held(&held);

    match verified_nickname(rank.map(|r| r.prefix.as_str()), &verified.roblox_display_name) {
        Some(nickname) => {
            if let Err(e) = roles.set_nickname(user_id, &nickname).await {
                tracing::warn!(
                    "Failed to set nickname for verified member {}: {}",
                    verified.discord_id,
                    e
                );
            }
        }
        None => tracing::warn!(
            "Nickname for verified member {} would exceed {} characters, leaving it unchanged",
            verified.discord_id,
            MAX_NICKNAME_LENGTH
        ),
    }

    let reason = Some("Roblox verification");
    let mut changes = Vec::new();
    if let Some(role) = verification_roles.verified {
        changes.push((role, true));
    }
    if let Some(role) = verification_roles.unverified {
        changes.push((role, false));
    }
    if let (Some(role), None) = (verification_roles.unranked, rank) {
        changes.push((role, true));
    }

    for (role, add) in changes {
        let result = if add {
            roles.add_role(user_id, role, reason).await
        } else {
            roles.remove_role(user_id, role, reason).await
        };
        if let Err(e) = result {
            tracing::error!(
                "Failed to update verification role {} for member {}: {}",
                role,
                verified.discord_id,
                e
            );
        }
    }
}

/// Reverses the verification roles after a member's link is removed.
///
/// Failures are logged and skipped like in `apply_member_roles`.
pub async fn revoke_member_roles(
    roles: &dyn RoleProvider,
    verification_roles: VerificationRoles,
    user_id: UserId,
) {
    let reason = Some("Roblox verification removed");

    if let Some(role) = verification_roles.unverified {
        if let Err(e) = roles.add_role(user_id, role, reason).await {
            tracing::error!("Failed to add unverified role to {}: {}", user_id, e);
        }
    }
    if let Some(role) = verification_roles.verified {
        if let Err(e) = roles.remove_role(user_id, role, reason).await {
            tracing::error!("Failed to remove verified role from {}: {}", user_id, e);
        }
    }
}
