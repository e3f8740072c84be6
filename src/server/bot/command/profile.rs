use chrono::{DateTime, Utc};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::{options, Invocation},
    error::AppError,
    service::{
        account_data::{AccountData, AccountDataService},
        profile::{MemberProfile, ProfileService},
    },
};

pub fn register() -> CreateCommand {
    CreateCommand::new("profile")
        .description("Show rank, points and promotion status")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "Member to look up, yourself if omitted",
        ))
}

pub fn register_account_data() -> CreateCommand {
    CreateCommand::new("account-data").description("View all account data stored about you")
}

pub async fn profile(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let (user_id, username, roles) = match options::user(&invocation.options, "user") {
        Some(user) => {
            let member = invocation.member(user.id).await?;
            (member.user_id, member.username, member.role_ids)
        }
        None => (
            invocation.caller_id(),
            invocation.caller_name().to_string(),
            invocation.caller.roles.clone(),
        ),
    };

    let now = Utc::now();
    let state = invocation.state;
    let profile = ProfileService::new(&state.db, &state.bot_config.ranks)
        .get(user_id.get(), &roles, now)
        .await?;

    Ok(format_profile(&profile, &username, now))
}

/// Renders a profile as the command reply.
pub fn format_profile(profile: &MemberProfile, username: &str, now: DateTime<Utc>) -> String {
    let mut lines = vec![format!("**Profile: {}**", username)];

    lines.push(match &profile.rank {
        Some(rank) => format!("Rank: {} [{}]", rank.name, rank.prefix),
        None => "Rank: None".to_string(),
    });
    lines.push(format!("Points: {}", profile.points));

    if let Some(cooldown) = &profile.cooldown {
        let remaining = cooldown.remaining(now);
        lines.push(format!(
            "Cooldown: {}h {}m remaining",
            remaining.num_hours(),
            remaining.num_minutes() % 60
        ));
    }

    if let Some(lock) = &profile.lock {
        lines.push(format!("Rank locked: {}", lock.reason));
    }

    if let (Some(next), Some(requirement)) = (&profile.next_rank, &profile.next_requirement) {
        let needed = profile.points_needed();
        if needed > 0 {
            lines.push(format!(
                "Next rank: {} ({} points, {} more needed)",
                next.name, requirement.min_points, needed
            ));
        } else {
            lines.push(format!(
                "Next rank: {} ({} points, requirement met)",
                next.name, requirement.min_points
            ));
        }
    }

    lines.push(match &profile.verified {
        Some(link) => format!(
            "Roblox: {} ({})",
            link.roblox_display_name, link.roblox_username
        ),
        None => "Roblox: not verified".to_string(),
    });

    lines.join("\n")
}

pub async fn account_data(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let now = Utc::now();
    let data = AccountDataService::new(&invocation.state.db)
        .get(invocation.caller_id().get(), now)
        .await?;

    Ok(format_account_data(&data, invocation.caller_id().get()))
}

/// Renders a member's stored data as the command reply.
pub fn format_account_data(data: &AccountData, user_id: u64) -> String {
    if data.is_empty() {
        return "No data found for your account.".to_string();
    }

    let mut sections = vec![format!("**Your Data Overview**\nUser ID: {}", user_id)];

    if let Some(profile) = &data.profile {
        sections.push(format!(
            "**Profile**\nUsername: {}\nPoints: {}\nCreated: <t:{}:F>\nLast updated: <t:{}:R>",
            profile.username,
            profile.points,
            profile.created_at.timestamp(),
            profile.updated_at.timestamp()
        ));
    }

    if let Some(link) = &data.verified {
        sections.push(format!(
            "**Roblox**\nUsername: {}\nDisplay name: {}\nUser ID: {}\nVerified: <t:{}:R>",
            link.roblox_username,
            link.roblox_display_name,
            link.roblox_id,
            link.verified_at.timestamp()
        ));
    }

    sections.push(format!("**Activity**\nEvents attended: {}", data.events_attended));

    if !data.cooldowns.is_empty() {
        let lines: Vec<String> = data
            .cooldowns
            .iter()
            .map(|cooldown| {
                format!(
                    "{} until <t:{}:R>",
                    cooldown.rank,
                    cooldown.cooldown_until.timestamp()
                )
            })
            .collect();
        sections.push(format!(
            "**Rank cooldowns ({})**\n{}",
            lines.len(),
            lines.join("\n")
        ));
    }

    if !data.locks.is_empty() {
        let lines: Vec<String> = data
            .locks
            .iter()
            .map(|lock| format!("{}: {}", lock.rank, lock.reason))
            .collect();
        sections.push(format!(
            "**Rank locks ({})**\n{}",
            lines.len(),
            lines.join("\n")
        ));
    }

    sections.join("\n\n")
}
