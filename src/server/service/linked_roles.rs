//! Linked role propagation.
//!
//! A linked role set names a parent role and its child roles. A member holds the parent
//! role exactly when they hold at least one child role. Rules are evaluated per parent,
//! so two sets sharing a parent behave as one set with the union of their children.

use serenity::all::RoleId;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::server::{
    error::role::RoleError,
    model::{
        config::LinkedRoleSet,
        linked_role::{LinkedRoleChanges, LinkedRoleSyncSummary, LinkedRoleUpdate},
        ranking::RankMember,
    },
    service::role_provider::RoleProvider,
};

/// Members processed between pauses during a bulk sync.
const SYNC_BATCH_SIZE: usize = 10;
/// Pause between batches to stay clear of Discord's rate limits.
const SYNC_PAUSE: Duration = Duration::from_secs(1);

const SYNC_REASON: &str = "Linked role sync";

/// Parent roles to add or remove so `member_roles` satisfies every linked role set.
pub fn evaluate(sets: &[LinkedRoleSet], member_roles: &[RoleId]) -> LinkedRoleChanges {
    let mut wanted: BTreeMap<RoleId, bool> = BTreeMap::new();
    for set in sets {
        let has_child = set
            .child_role_ids
            .iter()
            .any(|child| member_roles.contains(child));
        *wanted.entry(set.parent_role_id).or_insert(false) |= has_child;
    }

    let mut changes = LinkedRoleChanges::default();
    for (parent, should_have) in wanted {
        let has = member_roles.contains(&parent);
        if should_have && !has {
            changes.add.push(parent);
        } else if !should_have && has {
            changes.remove.push(parent);
        }
    }

    changes
}

/// Whether a change to `role_id` can affect any parent role.
pub fn should_trigger(sets: &[LinkedRoleSet], role_id: RoleId) -> bool {
    sets.iter().any(|set| set.child_role_ids.contains(&role_id))
}

pub struct LinkedRoleService<'a> {
    sets: &'a [LinkedRoleSet],
    roles: &'a dyn RoleProvider,
}

impl<'a> LinkedRoleService<'a> {
    pub fn new(sets: &'a [LinkedRoleSet], roles: &'a dyn RoleProvider) -> Self {
        Self { sets, roles }
    }

    /// Brings one member's parent roles in line with their child roles.
    ///
    /// # Returns
    /// - `Ok(LinkedRoleUpdate)` - Changes applied; other Discord failures are logged and
    ///   counted in `failed`
    /// - `Err(RoleError::PermissionDenied)` - The bot may not manage a parent role for
    ///   this member, typically because the member outranks the bot
    pub async fn update_member(&self, member: &RankMember) -> Result<LinkedRoleUpdate, RoleError> {
        let changes = evaluate(self.sets, &member.role_ids);
        let mut update = LinkedRoleUpdate::default();

        for role_id in changes.add {
            match self
                .roles
                .add_role(member.user_id, role_id, Some(SYNC_REASON))
                .await
            {
                Ok(()) => update.added.push(role_id),
                Err(e) if e.is_permission_denied() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Failed to add linked role {} to {}: {}",
                        role_id,
                        member.user_id,
                        e
                    );
                    update.failed += 1;
                }
            }
        }

        for role_id in changes.remove {
            match self
                .roles
                .remove_role(member.user_id, role_id, Some(SYNC_REASON))
                .await
            {
                Ok(()) => update.removed.push(role_id),
                Err(e) if e.is_permission_denied() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Failed to remove linked role {} from {}: {}",
                        role_id,
                        member.user_id,
                        e
                    );
                    update.failed += 1;
                }
            }
        }

        if !update.added.is_empty() || !update.removed.is_empty() {
            tracing::debug!(
                "Linked roles for {}: +{} -{}",
                member.username,
                update.added.len(),
                update.removed.len()
            );
        }

        Ok(update)
    }

    /// Syncs linked roles for every member, one at a time.
    ///
    /// Pauses for a second after every ten members. Members the bot lacks permission to
    /// manage are skipped without counting as errors.
    pub async fn sync_all(&self, members: &[RankMember]) -> LinkedRoleSyncSummary {
        let mut summary = LinkedRoleSyncSummary::default();

        for (index, member) in members.iter().enumerate() {
            if index > 0 && index % SYNC_BATCH_SIZE == 0 {
                tokio::time::sleep(SYNC_PAUSE).await;
            }

            match self.update_member(member).await {
                Ok(update) => {
                    summary.roles_added += update.added.len();
                    summary.roles_removed += update.removed.len();
                    summary.errors += update.failed;
                }
                Err(e) => {
                    tracing::debug!("Skipping linked role sync for {}: {}", member.username, e);
                }
            }
            summary.processed += 1;
        }

        tracing::info!(
            "Linked role sync processed {} members: {} added, {} removed, {} errors",
            summary.processed,
            summary.roles_added,
            summary.roles_removed,
            summary.errors
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::{
        config::{bot_config, JSG_ROLE, NCO_CORPS_ROLE, PVT_ROLE, SGT_ROLE},
        fakes::FakeRoleProvider,
    };
    use serenity::all::UserId;

    fn member(user_id: u64, roles: &[u64]) -> RankMember {
        RankMember {
            user_id: UserId::new(user_id),
            username: format!("member{}", user_id),
            role_ids: roles.iter().map(|id| RoleId::new(*id)).collect(),
        }
    }

    fn roles(ids: &[u64]) -> Vec<RoleId> {
        ids.iter().map(|id| RoleId::new(*id)).collect()
    }

    #[test]
    fn grants_parent_to_child_holders() {
        let config = bot_config();

        let changes = evaluate(&config.linked_roles, &roles(&[SGT_ROLE]));

        assert_eq!(changes.add, roles(&[NCO_CORPS_ROLE]));
        assert!(changes.remove.is_empty());
    }

    #[test]
    fn removes_parent_without_children() {
        let config = bot_config();

        let changes = evaluate(&config.linked_roles, &roles(&[PVT_ROLE, NCO_CORPS_ROLE]));

        assert_eq!(changes.remove, roles(&[NCO_CORPS_ROLE]));
        assert!(evaluate(&config.linked_roles, &roles(&[JSG_ROLE, NCO_CORPS_ROLE])).is_empty());
    }

    #[test]
    fn shared_parent_is_kept_if_any_set_matches() {
        let sets = vec![
            LinkedRoleSet {
                parent_role_id: RoleId::new(100),
                parent_role_name: "Parent".to_string(),
                child_role_ids: roles(&[1]),
                description: None,
            },
            LinkedRoleSet {
                parent_role_id: RoleId::new(100),
                parent_role_name: "Parent".to_string(),
                child_role_ids: roles(&[2]),
                description: None,
            },
        ];

        assert!(evaluate(&sets, &roles(&[2, 100])).is_empty());
    }

    #[test]
    fn triggers_only_on_child_roles() {
        let config = bot_config();

        assert!(should_trigger(&config.linked_roles, RoleId::new(SGT_ROLE)));
        assert!(!should_trigger(&config.linked_roles, RoleId::new(NCO_CORPS_ROLE)));
        assert!(!should_trigger(&config.linked_roles, RoleId::new(PVT_ROLE)));
    }

    #[tokio::test]
    async fn update_member_applies_changes() {
        let config = bot_config();
        let provider = FakeRoleProvider::new();
        let service = LinkedRoleService::new(&config.linked_roles, &provider);

        let update = service.update_member(&member(1, &[SGT_ROLE])).await.unwrap();

        assert_eq!(update.added, roles(&[NCO_CORPS_ROLE]));
        assert!(provider.roles_of(1).contains(&RoleId::new(NCO_CORPS_ROLE)));
    }

    #[tokio::test]
    async fn update_member_propagates_permission_denied() {
        let config = bot_config();
        let provider = FakeRoleProvider::new().deny_role(NCO_CORPS_ROLE);
        let service = LinkedRoleService::new(&config.linked_roles, &provider);

        let result = service.update_member(&member(1, &[SGT_ROLE])).await;

        assert!(matches!(result, Err(RoleError::PermissionDenied(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn sync_all_counts_changes_and_skips_denied_members() {
        let config = bot_config();
        let provider = FakeRoleProvider::new().break_role(NCO_CORPS_ROLE);
        let service = LinkedRoleService::new(&config.linked_roles, &provider);

        let members: Vec<RankMember> = (1..=12).map(|id| member(id, &[PVT_ROLE])).collect();
        let mut with_changes = members.clone();
        with_changes.push(member(13, &[SGT_ROLE]));

        let summary = service.sync_all(&with_changes).await;

        assert_eq!(summary.processed, 13);
        assert_eq!(summary.roles_added, 0);
        assert_eq!(summary.errors, 1);

        let provider = FakeRoleProvider::new().deny_role(NCO_CORPS_ROLE);
        let service = LinkedRoleService::new(&config.linked_roles, &provider);

        let summary = service
            .sync_all(&[member(1, &[SGT_ROLE]), member(2, &[PVT_ROLE, NCO_CORPS_ROLE])])
            .await;

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.roles_removed, 0);
    }
}
