use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, RoleId, User};

use crate::server::{
    model::{
        config::LinkedRoleSet,
        rank::RankTable,
        ranking::{rank_nickname, strip_rank_prefix, RankMember, MAX_NICKNAME_LENGTH},
    },
    service::{
        linked_roles::{should_trigger, LinkedRoleService},
        member::MemberService,
        role_provider::RoleProvider,
    },
    state::AppState,
};

/// Handles the guild_member_addition event by marking the new member as unverified
pub async fn handle_guild_member_addition(state: &AppState, _ctx: Context, new_member: Member) {
    if new_member.guild_id != state.guild_id || new_member.user.bot {
        return;
    }

    let Some(role_id) = state.verification_roles.unverified else {
        return;
    };

    let roles = state.role_provider();
    if let Err(e) = roles
        .add_role(new_member.user.id, role_id, Some("New member"))
        .await
    {
        tracing::error!(
            "Failed to give unverified role to new member {}: {}",
            new_member.user.name,
            e
        );
    }
}

/// Handles the guild_member_removal event by deleting everything stored for the member
pub async fn handle_guild_member_removal(
    state: &AppState,
    _ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    if guild_id != state.guild_id {
        return;
    }

    if let Err(e) = MemberService::new(&state.db)
        .remove_member_data(user.id.get())
        .await
    {
        tracing::error!(
            "Failed to remove data of departed member {} ({}): {}",
            user.name,
            user.id,
            e
        );
    }
}

/// Handles the guild_member_update event: keeps linked parent roles and the rank tag
/// in the nickname in line with the member's roles
pub async fn handle_guild_member_update(
    state: &AppState,
    _ctx: Context,
    old: Option<Member>,
    _new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    if event.guild_id != state.guild_id || event.user.bot {
        return;
    }

    let member = RankMember {
        user_id: event.user.id,
        username: event.user.name.clone(),
        role_ids: event.roles.clone(),
    };
    let roles = state.role_provider();

    let old_roles = old.as_ref().map(|member| member.roles.as_slice());
    if linked_roles_affected(&state.bot_config.linked_roles, old_roles, &member.role_ids) {
        let service = LinkedRoleService::new(&state.bot_config.linked_roles, &roles);
        if let Err(e) = service.update_member(&member).await {
            tracing::warn!(
                "Skipped linked role update for {}: {}",
                member.username,
                e
            );
        }
    }

    let Some(nickname) = desired_nickname(
        &state.bot_config.ranks,
        &member.role_ids,
        event.nick.as_deref(),
        &member.username,
    ) else {
        return;
    };

    match roles.set_nickname(member.user_id, &nickname).await {
        Ok(()) => tracing::debug!("Renamed {} to {}", member.username, nickname),
        Err(e) => tracing::warn!(
            "Failed to update nickname of {} to {}: {}",
            member.username,
            nickname,
            e
        ),
    }
}

/// Whether a role update can change any linked parent role.
///
/// Without the previous role list every update is treated as relevant.
pub fn linked_roles_affected(
    sets: &[LinkedRoleSet],
    old_roles: Option<&[RoleId]>,
    new_roles: &[RoleId],
) -> bool {
    if sets.is_empty() {
        return false;
    }

    let Some(old_roles) = old_roles else {
        return true;
    };

    old_roles
        .iter()
        .filter(|role| !new_roles.contains(*role))
        .chain(new_roles.iter().filter(|role| !old_roles.contains(*role)))
        .any(|role| should_trigger(sets, *role))
}

/// Nickname the member should carry for their highest rank.
///
/// A member without a rank loses any rank tag. The current nickname, or the username
/// when none is set, is the base name.
///
/// # Returns
/// - `Some(String)` - A nickname different from the current one
/// - `None` - The current nickname is already correct
pub fn desired_nickname(
    ranks: &RankTable,
    role_ids: &[RoleId],
    nickname: Option<&str>,
    username: &str,
) -> Option<String> {
    let current = nickname.unwrap_or(username);

    let desired = match ranks.highest_held(role_ids) {
        Some(rank) => rank_nickname(&rank.prefix, current),
        None => {
            let base = strip_rank_prefix(current);
            if base.chars().count() <= MAX_NICKNAME_LENGTH {
                base.to_string()
            } else {
                let kept: String = base.chars().take(MAX_NICKNAME_LENGTH - 3).collect();
                format!("{}...", kept)
            }
        }
    };

    (desired != current).then_some(desired)
}
