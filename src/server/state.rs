//! Application state shared across HTTP handlers and bot commands.
//!
//! The state is built once during startup. The axum router clones it per request and the
//! bot's event handler holds one copy for its whole lifetime.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client and OAuth2 clients for the verification flow
//! - The validated bot configuration
//! - Discord HTTP client for role and nickname changes

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, GuildId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    model::config::BotConfig,
    service::{
        audit_log::DiscordAuditLog, role_provider::SerenityRoleProvider,
        verification::VerificationRoles,
    },
};

/// Type alias for an OAuth2 client with authorize and token endpoints configured.
///
/// Used for both the Discord and the Roblox leg of verification.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `BotConfig` and `Http` sit behind `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for OAuth token exchange and provider user lookups.
    ///
    /// Configured without redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord identity check.
    pub discord_oauth: OAuth2Client,

    /// OAuth2 client for the Roblox account link.
    pub roblox_oauth: OAuth2Client,

    /// Ranks, permission sets, linked roles, event types and point bounds.
    pub bot_config: Arc<BotConfig>,

    /// Discord HTTP client for bot API operations.
    pub discord_http: Arc<Http>,

    /// The single guild the bot manages.
    pub guild_id: GuildId,

    /// Roles granted or removed once a member verifies.
    pub verification_roles: VerificationRoles,

    /// Channel receiving promotion, demotion and event embeds, if configured.
    pub audit_channel_id: Option<ChannelId>,
}

impl AppState {
    /// Role provider acting on the managed guild.
    pub fn role_provider(&self) -> SerenityRoleProvider {
        SerenityRoleProvider::new(self.discord_http.clone(), self.guild_id)
    }

    pub fn audit_log(&self) -> DiscordAuditLog {
        DiscordAuditLog::new(self.discord_http.clone(), self.audit_channel_id)
    }
}
