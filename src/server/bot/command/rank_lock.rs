use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::{options, Invocation},
    error::AppError,
    service::rank_lock::RankLockService,
};

pub fn register_lock() -> CreateCommand {
    CreateCommand::new("rank-lock")
        .description("Stop a member from being promoted past their current rank")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to lock")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "reason", "Why the member is locked")
                .required(true),
        )
}

pub fn register_unlock() -> CreateCommand {
    CreateCommand::new("rank-unlock")
        .description("Remove the rank lock at a member's current rank")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to unlock")
                .required(true),
        )
}

pub async fn lock(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let reason = options::required_string(&invocation.options, "reason")?;
    let member = invocation.member(user.id).await?;

    let state = invocation.state;
    let lock = RankLockService::new(&state.db, &state.bot_config.ranks)
        .lock(
            user.id.get(),
            &member.role_ids,
            reason,
            invocation.caller_id().get(),
        )
        .await?;

    Ok(format!(
        "Locked {} at rank {}.\nReason: {}",
        user.name, lock.rank, lock.reason
    ))
}

pub async fn unlock(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let member = invocation.member(user.id).await?;

    let state = invocation.state;
    let rank = RankLockService::new(&state.db, &state.bot_config.ranks)
        .unlock(user.id.get(), &member.role_ids)
        .await?;

    Ok(format!("Unlocked {} at rank {}.", user.name, rank))
}
