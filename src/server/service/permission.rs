//! Command permissions resolved from the member's rank.

use serenity::all::RoleId;

use crate::server::model::config::BotConfig;

pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to use this command.";

/// Self-service commands every member may run, ranked or not.
///
/// New members hold no rank until they verify, so gating `/verify` would lock them out.
pub const OPEN_COMMANDS: &[&str] = &["verify", "unverify", "profile", "account-data"];

/// Commands whose handler decides who may run them.
///
/// `/start-event` admits department members for their own event types regardless of rank.
pub const SELF_AUTHORIZED_COMMANDS: &[&str] = &["start-event"];

pub fn is_open_command(command: &str) -> bool {
    OPEN_COMMANDS.contains(&command)
}

/// Whether the dispatcher must check the caller's rank before running `command`.
pub fn requires_rank_permission(command: &str) -> bool {
    !is_open_command(command) && !SELF_AUTHORIZED_COMMANDS.contains(&command)
}

/// Whether a member holding `member_roles` may run `command`.
///
/// The member's highest rank selects a permission set. Members with no rank, or whose
/// rank names a permission set that does not exist, are denied.
pub fn has_command_permission(config: &BotConfig, member_roles: &[RoleId], command: &str) -> bool {
    let Some(rank) = config.ranks.highest_held(member_roles) else {
        tracing::debug!("Denied /{}: member holds no rank", command);
        return false;
    };

    let Some(set) = config.permission_set_for(rank) else {
        tracing::warn!(
            "Rank {} references missing permission set {}",
            rank.prefix,
            rank.permission_set
        );
        return false;
    };

    set.allows(command)
}
