//! Recording fakes for the Discord collaborators.

use serenity::{
    all::{RoleId, UserId},
    async_trait,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::server::{
    error::{role::RoleError, AppError},
    service::{
        audit_log::{AuditEntry, AuditLog},
        role_provider::RoleProvider,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCall {
    Add(UserId, RoleId),
    Remove(UserId, RoleId),
    Nickname(UserId, String),
}

/// In-memory guild membership that records every mutation.
#[derive(Default)]
pub struct FakeRoleProvider {
    members: Mutex<HashMap<UserId, HashSet<RoleId>>>,
    denied: Mutex<HashSet<RoleId>>,
    broken: Mutex<HashSet<RoleId>>,
    deny_nickname: Mutex<bool>,
    calls: Mutex<Vec<RoleCall>>,
}

impl FakeRoleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `user_id` the listed roles.
    pub fn with_member(self, user_id: u64, role_ids: &[u64]) -> Self {
        self.members.lock().unwrap().insert(
            UserId::new(user_id),
            role_ids.iter().map(|id| RoleId::new(*id)).collect(),
        );
        self
    }

    /// Makes every change to `role_id` fail with Discord code 50013.
    pub fn deny_role(self, role_id: u64) -> Self {
        self.denied.lock().unwrap().insert(RoleId::new(role_id));
        self
    }

    /// Makes every change to `role_id` fail with a generic Discord error.
    pub fn break_role(self, role_id: u64) -> Self {
        self.broken.lock().unwrap().insert(RoleId::new(role_id));
        self
    }

    pub fn deny_nickname(self) -> Self {
        *self.deny_nickname.lock().unwrap() = true;
        self
    }

    pub fn calls(&self) -> Vec<RoleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn roles_of(&self, user_id: u64) -> HashSet<RoleId> {
        self.members
            .lock()
            .unwrap()
            .get(&UserId::new(user_id))
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, role_id: RoleId) -> Result<(), RoleError> {
        if self.denied.lock().unwrap().contains(&role_id) {
            return Err(RoleError::PermissionDenied(role_id));
        }
        if self.broken.lock().unwrap().contains(&role_id) {
            return Err(RoleError::Discord(Box::new(serenity::Error::Other(
                "role request failed",
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleProvider for FakeRoleProvider {
    async fn add_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        _reason: Option<&str>,
    ) -> Result<(), RoleError> {
        self.check(role_id)?;
        self.calls
            .lock()
            .unwrap()
            .push(RoleCall::Add(user_id, role_id));
        self.members
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .insert(role_id);
        Ok(())
    }

    async fn remove_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        _reason: Option<&str>,
    ) -> Result<(), RoleError> {
        self.check(role_id)?;
        self.calls
            .lock()
            .unwrap()
            .push(RoleCall::Remove(user_id, role_id));
        if let Some(roles) = self.members.lock().unwrap().get_mut(&user_id) {
            roles.remove(&role_id);
        }
        Ok(())
    }

    async fn has_role(&self, user_id: UserId, role_id: RoleId) -> Result<bool, RoleError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .get(&user_id)
            .is_some_and(|roles| roles.contains(&role_id)))
    }

    async fn member_roles(&self, user_id: UserId) -> Result<Vec<RoleId>, RoleError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn set_nickname(&self, user_id: UserId, nickname: &str) -> Result<(), RoleError> {
        if *self.deny_nickname.lock().unwrap() {
            return Err(RoleError::NicknamePermissionDenied);
        }
        self.calls
            .lock()
            .unwrap()
            .push(RoleCall::Nickname(user_id, nickname.to_string()));
        Ok(())
    }
}

/// Audit log that keeps entries in memory, optionally failing every write.
#[derive(Default)]
pub struct RecordingAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
    failing: bool,
}

impl RecordingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::InternalError("audit channel unavailable".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
