use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::{options, Invocation},
    error::AppError,
    model::config::BotConfig,
    service::points::PointsService,
};

pub fn register(config: &BotConfig) -> CreateCommand {
    let bounds = config.points;
    let amount_description = format!(
        "Points to add, negative to remove ({} to {})",
        bounds.min_adjustment, bounds.max_adjustment
    );

    CreateCommand::new("adjust-points")
        .description("Add or remove points from a member")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Member to adjust")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "amount", amount_description)
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "reason", "Why the points change")
                .required(true),
        )
}

pub async fn adjust_points(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let user = options::required_user(&invocation.options, "user")?;
    let amount = options::required_integer(&invocation.options, "amount")?;
    let reason = options::required_string(&invocation.options, "reason")?;

    let bounds = invocation.state.bot_config.points;
    let delta = i32::try_from(amount).map_err(|_| {
        AppError::BadRequest(format!(
            "Amount must be between {} and {}",
            bounds.min_adjustment, bounds.max_adjustment
        ))
    })?;

    let profile = PointsService::new(&invocation.state.db, bounds)
        .adjust(user.id.get(), &user.name, delta)
        .await?;

    tracing::info!(
        "{} adjusted points of {} by {}: {}",
        invocation.caller_name(),
        user.name,
        delta,
        reason
    );

    Ok(adjustment_reply(&user.name, delta, profile.points, reason))
}

pub fn adjustment_reply(username: &str, delta: i32, total: i32, reason: &str) -> String {
    let verb = if delta < 0 { "Removed" } else { "Added" };
    let preposition = if delta < 0 { "from" } else { "to" };

    format!(
        "{} {} points {} {}. New total: {}\nReason: {}",
        verb,
        delta.unsigned_abs(),
        preposition,
        username,
        total,
        reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_describes_direction_of_change() {
        assert_eq!(
            adjustment_reply("recruit", 25, 125, "Event help"),
            "Added 25 points to recruit. New total: 125\nReason: Event help"
        );
        assert_eq!(
            adjustment_reply("recruit", -40, 0, "Correction"),
            "Removed 40 points from recruit. New total: 0\nReason: Correction"
        );
    }
}
