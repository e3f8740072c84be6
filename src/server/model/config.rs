//! Bot configuration file.
//!
//! Ranks, promotion requirements, permission sets, linked role sets, event types and
//! point adjustment bounds are all data rather than code. They are read from a single JSON
//! document at startup and validated before the bot connects, so a broken reference fails
//! the process instead of silently denying commands later.

use serde::Deserialize;
use serenity::all::RoleId;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::rank::{Rank, RankRequirement, RankTable, MAX_COOLDOWN_DAYS},
};

/// Whether a permission set lists allowed or denied commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PermissionKind {
    /// Only the listed commands are allowed; `*` allows everything.
    #[serde(rename = ".INCLUDE")]
    Include,
    /// Every command except the listed ones is allowed.
    #[serde(rename = ".EXCEPT")]
    Except,
}

/// Named list of commands a group of ranks may or may not run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PermissionSet {
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    pub commands: Vec<String>,
}

impl PermissionSet {
    /// Whether this set grants access to `command`.
    pub fn allows(&self, command: &str) -> bool {
        let listed = self.commands.iter().any(|c| c == command);
        match self.kind {
            PermissionKind::Include => listed || self.commands.iter().any(|c| c == "*"),
            PermissionKind::Except => !listed,
        }
    }
}

/// Parent role granted automatically while a member holds any of the child roles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkedRoleSet {
    pub parent_role_id: RoleId,
    pub parent_role_name: String,
    pub child_role_ids: Vec<RoleId>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Point award rules for one event type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventTypeConfig {
    pub base_per_hour: i32,
    pub bonus_per_30_min: i32,
    pub max_points: i32,
    #[serde(default)]
    pub description: String,
    /// Department role required to host this type.
    ///
    /// Types without one may be hosted by anyone whose rank grants `start-event`.
    #[serde(default)]
    pub department_role_id: Option<RoleId>,
}

/// Bounds on a single manual point adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_min_adjustment")]
    pub min_adjustment: i32,
    #[serde(default = "default_max_adjustment")]
    pub max_adjustment: i32,
}

fn default_min_adjustment() -> i32 {
    -500
}

fn default_max_adjustment() -> i32 {
    500
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            min_adjustment: default_min_adjustment(),
            max_adjustment: default_max_adjustment(),
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
struct RawBotConfig {
    ranks: Vec<Rank>,
    #[serde(default)]
    requirements: HashMap<String, RankRequirement>,
    permission_sets: HashMap<String, PermissionSet>,
    #[serde(default)]
    linked_roles: Vec<LinkedRoleSet>,
    #[serde(default)]
    event_types: BTreeMap<String, EventTypeConfig>,
    #[serde(default)]
    points: PointsConfig,
}

/// Validated bot configuration shared by every command handler.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub ranks: RankTable,
    pub permission_sets: HashMap<String, PermissionSet>,
    pub linked_roles: Vec<LinkedRoleSet>,
    pub event_types: BTreeMap<String, EventTypeConfig>,
    pub points: PointsConfig,
}

impl BotConfig {
    /// Reads and validates the configuration file at `path`.
    ///
    /// # Arguments
    /// - `path` - Location of the JSON configuration file
    ///
    /// # Returns
    /// - `Ok(BotConfig)` - Parsed and validated configuration
    /// - `Err(AppError::IoErr)` - File could not be read
    /// - `Err(AppError::JsonErr)` - File is not valid JSON for this schema
    /// - `Err(AppError::ConfigErr(InvalidBotConfig))` - Tables reference each other inconsistently
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;

        tracing::info!(
            "Loaded bot config from {} ({} ranks, {} linked role sets, {} event types)",
            path.display(),
            config.ranks.ranks().len(),
            config.linked_roles.len(),
            config.event_types.len()
        );

        Ok(config)
    }

    /// Parses and validates configuration from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, AppError> {
        let raw: RawBotConfig = serde_json::from_str(contents)?;
        validate(&raw)?;

        Ok(Self {
            ranks: RankTable::new(raw.ranks, raw.requirements),
            permission_sets: raw.permission_sets,
            linked_roles: raw.linked_roles,
            event_types: raw.event_types,
            points: raw.points,
        })
    }

    /// Permission set referenced by `rank`, if it exists.
    pub fn permission_set_for(&self, rank: &Rank) -> Option<&PermissionSet> {
        self.permission_sets.get(&rank.permission_set)
    }

    pub fn event_type(&self, name: &str) -> Option<&EventTypeConfig> {
        self.event_types.get(name)
    }
}

fn validate(raw: &RawBotConfig) -> Result<(), ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidBotConfig(msg);

    if raw.ranks.is_empty() {
        return Err(invalid("at least one rank must be configured".to_string()));
    }

    let mut prefixes = HashSet::new();
    for rank in &raw.ranks {
        if !prefixes.insert(rank.prefix.as_str()) {
            return Err(invalid(format!("duplicate rank prefix {}", rank.prefix)));
        }
    }

    for rank in &raw.ranks {
        if !raw.permission_sets.contains_key(&rank.permission_set) {
            return Err(invalid(format!(
                "rank {} references unknown permission set {}",
                rank.prefix, rank.permission_set
            )));
        }
        if let Some(ceiling) = &rank.max_promote_to {
            if !prefixes.contains(ceiling.as_str()) {
                return Err(invalid(format!(
                    "rank {} has unknown promotion ceiling {}",
                    rank.prefix, ceiling
                )));
            }
        }
    }

    for (prefix, requirement) in &raw.requirements {
        if !prefixes.contains(prefix.as_str()) {
            return Err(invalid(format!("requirement for unknown rank {}", prefix)));
        }
        if !requirement.cooldown_days.is_finite()
            || requirement.cooldown_days < 0.0
            || requirement.cooldown_days > MAX_COOLDOWN_DAYS
        {
            return Err(invalid(format!(
                "rank {} has invalid cooldown_days {}",
                prefix, requirement.cooldown_days
            )));
        }
        if requirement.min_points < 0 {
            return Err(invalid(format!(
                "rank {} has negative min_points {}",
                prefix, requirement.min_points
            )));
        }
    }

    for set in &raw.linked_roles {
        if set.child_role_ids.is_empty() {
            return Err(invalid(format!(
                "linked role set {} has no child roles",
                set.parent_role_name
            )));
        }
    }

    for (name, event_type) in &raw.event_types {
        if event_type.base_per_hour < 0 || event_type.bonus_per_30_min < 0 || event_type.max_points < 0
        {
            return Err(invalid(format!("event type {} has negative point values", name)));
        }
    }

    if raw.points.min_adjustment > raw.points.max_adjustment {
        return Err(invalid(format!(
            "points.min_adjustment {} exceeds points.max_adjustment {}",
            raw.points.min_adjustment, raw.points.max_adjustment
        )));
    }

    Ok(())
}
