use serenity::all::CreateCommand;

use crate::server::{
    bot::command::Invocation,
    error::AppError,
    model::{linked_role::LinkedRoleSyncSummary, ranking::RankMember},
    service::linked_roles::LinkedRoleService,
};

/// Largest page Discord returns from the guild member list.
const MEMBER_PAGE_SIZE: u64 = 1000;

pub fn register() -> CreateCommand {
    CreateCommand::new("sync-linked-roles")
        .description("Bring every member's linked parent roles in line with their roles")
}

pub async fn sync_linked_roles(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let state = invocation.state;
    if state.bot_config.linked_roles.is_empty() {
        return Err(AppError::BadRequest(
            "No linked roles are configured.".to_string(),
        ));
    }

    let mut members = Vec::new();
    let mut after = None;
    loop {
        let page = state
            .discord_http
            .get_guild_members(state.guild_id, Some(MEMBER_PAGE_SIZE), after)
            .await?;

        let Some(last) = page.last() else {
            break;
        };
        after = Some(last.user.id.get());
        let is_last_page = (page.len() as u64) < MEMBER_PAGE_SIZE;

        members.extend(
            page.iter()
                .filter(|member| !member.user.bot)
                .map(RankMember::from_member),
        );

        if is_last_page {
            break;
        }
    }

    tracing::info!(
        "{} started a linked role sync over {} members",
        invocation.caller_name(),
        members.len()
    );

    let roles = state.role_provider();
    let summary = LinkedRoleService::new(&state.bot_config.linked_roles, &roles)
        .sync_all(&members)
        .await;

    Ok(sync_summary(&summary))
}

pub fn sync_summary(summary: &LinkedRoleSyncSummary) -> String {
    format!(
        "**Linked role sync complete**\nMembers processed: {}\nRoles added: {}\nRoles removed: {}\nErrors: {}",
        summary.processed, summary.roles_added, summary.roles_removed, summary.errors
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_counter() {
        let summary = LinkedRoleSyncSummary {
            processed: 120,
            roles_added: 4,
            roles_removed: 2,
            errors: 1,
        };

        assert_eq!(
            sync_summary(&summary),
            "**Linked role sync complete**\nMembers processed: 120\nRoles added: 4\nRoles removed: 2\nErrors: 1"
        );
    }
}
