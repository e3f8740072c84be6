//! Slash command registration and dispatch.
//!
//! Every interaction runs through `dispatch`. Staff commands are checked against the
//! caller's permission set before anything else happens; the reply is then deferred as
//! ephemeral and edited with the handler's text once it finishes. Handlers return
//! `Result<String, AppError>`: `BadRequest`, `NotFound` and verification errors are
//! shown to the caller as-is, anything else is logged and replaced by a generic message.

pub mod event;
pub mod linked_roles;
pub mod options;
pub mod points;
pub mod profile;
pub mod rank_lock;
pub mod ranking;
pub mod verification;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Member, ResolvedOption, UserId,
};

use crate::server::{
    error::{role::is_unknown_member, AppError},
    model::{
        config::BotConfig,
        ranking::{RankChangeOrder, RankMember},
    },
    service::permission::{
        has_command_permission, requires_rank_permission, PERMISSION_DENIED_MESSAGE,
    },
    state::AppState,
};

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing this command.";
pub const GUILD_ONLY_MESSAGE: &str = "This command can only be used in the server.";

/// Longest message content Discord accepts.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Every command the bot registers in its guild.
///
/// Event type choices are taken from `config`, so the command list must be registered
/// again after the bot config changes.
pub fn definitions(config: &BotConfig) -> Vec<CreateCommand> {
    vec![
        ranking::register_promote(),
        ranking::register_demote(),
        ranking::register_mass_promote(),
        points::register(config),
        rank_lock::register_lock(),
        rank_lock::register_unlock(),
        profile::register(),
        profile::register_account_data(),
        event::register_start(config),
        event::register_end(),
        event::register_transfer(),
        verification::register_verify(),
        verification::register_unverify(),
        verification::register_manual_verify(),
        linked_roles::register(),
    ]
}

/// One slash command invocation with everything a handler needs.
pub struct Invocation<'a> {
    pub state: &'a AppState,
    pub ctx: &'a Context,
    pub command: &'a CommandInteraction,
    /// Guild member who ran the command.
    pub caller: &'a Member,
    pub options: Vec<ResolvedOption<'a>>,
}

impl Invocation<'_> {
    pub fn caller_id(&self) -> UserId {
        self.caller.user.id
    }

    pub fn caller_name(&self) -> &str {
        &self.caller.user.name
    }

    /// Prefix of the caller's highest rank.
    pub fn caller_rank(&self) -> Option<String> {
        self.state
            .bot_config
            .ranks
            .highest_held(&self.caller.roles)
            .map(|rank| rank.prefix.clone())
    }

    /// Fetches a guild member with their current roles.
    ///
    /// # Returns
    /// - `Ok(RankMember)` - Member with fresh roles
    /// - `Err(AppError::NotFound)` - User is not in the guild
    /// - `Err(AppError::DiscordErr)` - Any other Discord failure
    pub async fn member(&self, user_id: UserId) -> Result<RankMember, AppError> {
        match self
            .state
            .discord_http
            .get_member(self.state.guild_id, user_id)
            .await
        {
            Ok(member) => Ok(RankMember::from_member(&member)),
            Err(e) if is_unknown_member(&e) => Err(AppError::NotFound(format!(
                "<@{}> is not a member of this server.",
                user_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// A rank change of `member` ordered by the caller.
    pub fn order(&self, member: RankMember, reason: Option<&str>) -> RankChangeOrder {
        RankChangeOrder {
            member,
            executor_id: self.caller_id(),
            executor_name: self.caller_name().to_string(),
            executor_rank: self.caller_rank(),
            reason: reason.map(str::to_string),
        }
    }
}

/// Runs a slash command and replies to it.
///
/// # Returns
/// - `Ok(())` - A reply was sent, including denial and error replies
/// - `Err(AppError::DiscordErr)` - The reply itself could not be sent
pub async fn dispatch(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let name = command.data.name.as_str();

    let caller = match (command.guild_id, command.member.as_deref()) {
        (Some(guild_id), Some(member)) if guild_id == state.guild_id => member,
        _ => return reply_ephemeral(ctx, command, GUILD_ONLY_MESSAGE).await,
    };

    if requires_rank_permission(name)
        && !has_command_permission(&state.bot_config, &caller.roles, name)
    {
        tracing::info!("Denied /{} for {}", name, caller.user.name);
        return reply_ephemeral(ctx, command, PERMISSION_DENIED_MESSAGE).await;
    }

    command.defer_ephemeral(&ctx.http).await?;

    let invocation = Invocation {
        state,
        ctx,
        command,
        caller,
        options: command.data.options(),
    };

    let reply = match run(&invocation).await {
        Ok(reply) => reply,
        Err(e) => user_message(name, e),
    };

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(truncate_message(&reply)),
        )
        .await?;

    Ok(())
}

async fn run(invocation: &Invocation<'_>) -> Result<String, AppError> {
    match invocation.command.data.name.as_str() {
        "promote" => ranking::promote(invocation).await,
        "demote" => ranking::demote(invocation).await,
        "mass-promote" => ranking::mass_promote(invocation).await,
        "adjust-points" => points::adjust_points(invocation).await,
        "rank-lock" => rank_lock::lock(invocation).await,
        "rank-unlock" => rank_lock::unlock(invocation).await,
        "profile" => profile::profile(invocation).await,
        "account-data" => profile::account_data(invocation).await,
        "start-event" => event::start_event(invocation).await,
        "end-event" => event::end_event(invocation).await,
        "transfer-event" => event::transfer_event(invocation).await,
        "verify" => verification::verify(invocation).await,
        "unverify" => verification::unverify(invocation).await,
        "manualverify" => verification::manual_verify(invocation).await,
        "sync-linked-roles" => linked_roles::sync_linked_roles(invocation).await,
        other => Err(AppError::BadRequest(format!("Unknown command: /{}", other))),
    }
}

async fn reply_ephemeral(
    ctx: &Context,
    command: &CommandInteraction,
    content: &str,
) -> Result<(), AppError> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Text shown to the caller when a command handler fails.
pub fn user_message(command: &str, err: AppError) -> String {
    match err {
        AppError::BadRequest(message) | AppError::NotFound(message) => message,
        AppError::AuthErr(e) => e.to_string(),
        err => {
            tracing::error!("/{} failed: {}", command, err);
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

/// Shortens `text` to Discord's message length limit.
pub fn truncate_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_LENGTH {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(MAX_MESSAGE_LENGTH - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{error::auth::AuthError, test_support::config::bot_config};

    #[test]
    fn shows_client_errors_and_hides_internal_ones() {
        assert_eq!(
            user_message("promote", AppError::BadRequest("User has no rank.".to_string())),
            "User has no rank."
        );
        assert_eq!(
            user_message("profile", AppError::NotFound("No profile".to_string())),
            "No profile"
        );
        assert_eq!(
            user_message(
                "adjust-points",
                AppError::DbErr(sea_orm::DbErr::Custom("disk full".to_string()))
            ),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            user_message(
                "manualverify",
                AppError::AuthErr(AuthError::RobloxAlreadyLinked { roblox_id: 42 })
            ),
            "Roblox account 42 is already linked to another Discord account"
        );
    }

    #[test]
    fn truncates_long_messages_to_discord_limit() {
        let long = "a".repeat(2500);

        let truncated = truncate_message(&long);

        assert_eq!(truncated.chars().count(), 2000);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_message("short"), "short");
    }

    #[test]
    fn registers_every_dispatched_command() {
        assert_eq!(definitions(&bot_config()).len(), 15);
    }
}
