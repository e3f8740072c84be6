use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, UserId};

use crate::server::{
    bot::command::{options, Invocation},
    error::AppError,
    model::ranking::PromotionResult,
    service::ranking::RankingService,
    util::mention::{parse_user_ids, MAX_MASS_TARGETS},
};

pub const DEFAULT_MASS_PROMOTION_REASON: &str = "Mass promotion";

pub fn register_promote() -> CreateCommand {
    CreateCommand::new("promote")
        .description("Promote a member to their next rank")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to promote")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "Reason for the promotion",
        ))
}

pub fn register_demote() -> CreateCommand {
    CreateCommand::new("demote")
        .description("Demote a member to the rank below their current one")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to demote")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "Reason for the demotion",
        ))
}

pub fn register_mass_promote() -> CreateCommand {
    CreateCommand::new("mass-promote")
        .description("Promote several members to their next rank")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "users",
                "Mentions or IDs of the members to promote",
            )
            .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "Reason for the promotions",
        ))
}

pub async fn promote(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let member = invocation.member(user.id).await?;
    let order = invocation.order(member, options::string(&invocation.options, "reason"));

    let state = invocation.state;
    let roles = state.role_provider();
    let audit = state.audit_log();
    let result = RankingService::new(&state.db, &state.bot_config.ranks, &roles, &audit)
        .promote_next(&order)
        .await;

    Ok(describe(&result))
}

pub async fn demote(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let member = invocation.member(user.id).await?;
    let order = invocation.order(member, options::string(&invocation.options, "reason"));

    let state = invocation.state;
    let roles = state.role_provider();
    let audit = state.audit_log();
    let result = RankingService::new(&state.db, &state.bot_config.ranks, &roles, &audit)
        .demote(&order)
        .await;

    Ok(describe(&result))
}

/// Promotes every listed member by one rank, one after another.
///
/// Members that cannot be fetched are reported as failures without stopping the batch.
pub async fn mass_promote(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let input = options::required_string(&invocation.options, "users")?;
    let reason = options::string(&invocation.options, "reason")
        .unwrap_or(DEFAULT_MASS_PROMOTION_REASON);

    let user_ids = parse_user_ids(input);
    if user_ids.is_empty() {
        return Err(AppError::BadRequest(
            "No valid users found. Mention members or paste their IDs.".to_string(),
        ));
    }
    if user_ids.len() > MAX_MASS_TARGETS {
        return Err(AppError::BadRequest(format!(
            "You can promote at most {} members at once.",
            MAX_MASS_TARGETS
        )));
    }

    let mut orders = Vec::with_capacity(user_ids.len());
    let mut lookup_failures = Vec::new();
    for user_id in user_ids {
        match invocation.member(UserId::new(user_id)).await {
            Ok(member) => orders.push(invocation.order(member, Some(reason))),
            Err(AppError::NotFound(message)) => lookup_failures.push(message),
            Err(e) => return Err(e),
        }
    }

    let state = invocation.state;
    let roles = state.role_provider();
    let audit = state.audit_log();
    let results = RankingService::new(&state.db, &state.bot_config.ranks, &roles, &audit)
        .promote_next_many(&orders)
        .await;

    tracing::info!(
        "{} mass promoted {} of {} members",
        invocation.caller_name(),
        results.iter().filter(|r| r.is_success()).count(),
        results.len() + lookup_failures.len()
    );

    Ok(mass_promotion_summary(&results, &lookup_failures))
}

/// Reply line for a single rank change.
pub fn describe(result: &PromotionResult) -> String {
    if result.is_success() {
        result.message.clone()
    } else {
        format!("<@{}>: {}", result.user_id, result.message)
    }
}

/// Summary of a mass promotion listing every failure.
pub fn mass_promotion_summary(results: &[PromotionResult], lookup_failures: &[String]) -> String {
    let promoted = results.iter().filter(|r| r.is_success()).count();
    let failures: Vec<String> = results
        .iter()
        .filter(|r| !r.is_success())
        .map(describe)
        .chain(lookup_failures.iter().cloned())
        .collect();

    let mut summary = format!(
        "**Mass promotion complete**\nPromoted: {}\nFailed: {}",
        promoted,
        failures.len()
    );
    for failure in failures {
        summary.push('\n');
        summary.push_str(&failure);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::ranking::PromotionStatus;

    fn result(user_id: u64, status: PromotionStatus, message: &str) -> PromotionResult {
        PromotionResult::for_member(
            UserId::new(user_id),
            Some("SGT".to_string()),
            status,
            message,
        )
    }

    #[test]
    fn failed_changes_name_the_member() {
        let denied = result(
            123456789012345678,
            PromotionStatus::CooldownActive,
            "Cooldown active. 5 hours remaining",
        );

        assert_eq!(
            describe(&denied),
            "<@123456789012345678>: Cooldown active. 5 hours remaining"
        );
    }

    #[test]
    fn summary_counts_successes_and_lists_failures() {
        let results = vec![
            result(1, PromotionStatus::Success, "Successfully promoted a from SGT to SSG"),
            result(2, PromotionStatus::RankLocked, "User is locked at rank SGT"),
            result(3, PromotionStatus::Success, "Successfully promoted c from SGT to SSG"),
        ];
        let lookups = vec!["<@4> is not a member of this server.".to_string()];

        let summary = mass_promotion_summary(&results, &lookups);

        assert_eq!(
            summary,
            "**Mass promotion complete**\nPromoted: 2\nFailed: 2\n<@2>: User is locked at rank SGT\n<@4> is not a member of this server."
        );
    }
}
