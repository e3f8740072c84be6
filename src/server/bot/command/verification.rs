use chrono::Utc;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::{options, Invocation},
    data::verified_user::VerifiedUserRepository,
    error::AppError,
    service::{
        permission::{has_command_permission, PERMISSION_DENIED_MESSAGE},
        verification::{
            apply_member_roles, revoke_member_roles, VerificationService, STATE_TTL_MINUTES,
        },
    },
    state::AppState,
};

pub fn register_verify() -> CreateCommand {
    CreateCommand::new("verify").description("Link your Roblox account to your Discord account")
}

pub fn register_unverify() -> CreateCommand {
    CreateCommand::new("unverify")
        .description("Remove a Roblox account link")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "Member to unverify, yourself if omitted",
        ))
}

pub fn register_manual_verify() -> CreateCommand {
    CreateCommand::new("manualverify")
        .description("Link a member to a Roblox account by ID")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to verify")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "roblox_id",
                "Numeric Roblox user ID",
            )
            .required(true),
        )
}

fn verification_service(state: &AppState) -> VerificationService<'_> {
    VerificationService::new(
        &state.db,
        &state.http_client,
        &state.discord_oauth,
        &state.roblox_oauth,
    )
}

/// Starts the OAuth flow, or refreshes roles and nickname of an already verified caller.
pub async fn verify(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let state = invocation.state;
    let caller_id = invocation.caller_id().get();

    if let Some(existing) = VerifiedUserRepository::new(&state.db)
        .find_by_discord_id(caller_id)
        .await?
    {
        let roles = state.role_provider();
        apply_member_roles(
            &roles,
            &state.bot_config.ranks,
            state.verification_roles,
            &existing,
        )
        .await;

        return Ok(format!(
            "**Verification updated**\nYou are linked to {} (@{}). Your nickname and roles have been refreshed.",
            existing.roblox_display_name, existing.roblox_username
        ));
    }

    let url = verification_service(state)
        .begin(
            caller_id,
            Some(invocation.caller_name().to_string()),
            Utc::now(),
        )
        .await?;

    Ok(format!(
        "**Roblox verification**\nOpen the link below to confirm your Discord account, then sign in to Roblox. \
         Your nickname will be updated to your Roblox display name.\nThe link expires in {} minutes.\n{}",
        STATE_TTL_MINUTES, url
    ))
}

/// Removes the caller's own link, or another member's with the `unverify` permission.
pub async fn unverify(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let state = invocation.state;
    let target = options::user(&invocation.options, "user");

    let (user_id, username) = match target {
        Some(user) if user.id != invocation.caller_id() => {
            if !has_command_permission(&state.bot_config, &invocation.caller.roles, "unverify") {
                return Err(AppError::BadRequest(PERMISSION_DENIED_MESSAGE.to_string()));
            }
            (user.id, user.name.clone())
        }
        _ => (
            invocation.caller_id(),
            invocation.caller_name().to_string(),
        ),
    };
    let is_self = user_id == invocation.caller_id();

    if !verification_service(state).unverify(user_id.get()).await? {
        return Err(AppError::BadRequest(if is_self {
            "You are not verified. Run /verify to link your account.".to_string()
        } else {
            format!("{} is not verified.", username)
        }));
    }

    let roles = state.role_provider();
    revoke_member_roles(&roles, state.verification_roles, user_id).await;

    tracing::info!(
        "{} removed the verification of {}",
        invocation.caller_name(),
        username
    );

    Ok(if is_self {
        "**Verification removed**\nYour Roblox account has been unlinked. Run /verify to link it again."
            .to_string()
    } else {
        format!("**Verification removed**\nUnlinked the Roblox account of {}.", username)
    })
}

pub async fn manual_verify(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let roblox_id = parse_roblox_id(options::required_string(&invocation.options, "roblox_id")?)?;
    let state = invocation.state;

    let verified = verification_service(state)
        .manual_verify(user.id.get(), &user.name, roblox_id)
        .await?;

    let roles = state.role_provider();
    apply_member_roles(
        &roles,
        &state.bot_config.ranks,
        state.verification_roles,
        &verified,
    )
    .await;

    tracing::info!(
        "{} manually verified {} as Roblox user {}",
        invocation.caller_name(),
        user.name,
        verified.roblox_id
    );

    Ok(format!(
        "**Manual verification complete**\n{} is now linked to {} (@{}), Roblox ID {}.",
        user.name, verified.roblox_display_name, verified.roblox_username, verified.roblox_id
    ))
}

/// Parses a positive numeric Roblox user ID.
pub fn parse_roblox_id(input: &str) -> Result<i64, AppError> {
    match input.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(
            "Invalid Roblox ID. Provide the numeric ID from the Roblox profile URL.".to_string(),
        )),
    }
}
