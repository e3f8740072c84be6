use serenity::all::RoleId;

/// Parent roles a member should gain or lose to match their child roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedRoleChanges {
    pub add: Vec<RoleId>,
    pub remove: Vec<RoleId>,
}

impl LinkedRoleChanges {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Counters reported after a bulk linked role sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkedRoleSyncSummary {
    pub processed: usize,
    pub roles_added: usize,
    pub roles_removed: usize,
    pub errors: usize,
}

/// Parent role changes actually applied to one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedRoleUpdate {
    pub added: Vec<RoleId>,
    pub removed: Vec<RoleId>,
    /// Role changes Discord rejected for reasons other than missing permissions.
    pub failed: usize,
}
