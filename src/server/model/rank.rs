//! Rank hierarchy and promotion requirements.
//!
//! The rank table is an ordered list where index 0 holds the highest authority. It is
//! loaded once from the bot configuration and never changes at runtime, so every lookup
//! here is a plain linear scan over a couple dozen entries.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serenity::all::RoleId;
use std::collections::HashMap;

/// Milliseconds in one day, used when converting fractional cooldown days.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Longest cooldown a rank may carry, ten years.
pub const MAX_COOLDOWN_DAYS: f64 = 3650.0;

/// A single rank in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    /// Display name, e.g. `Lieutenant`.
    pub name: String,
    /// Unique three letter code, e.g. `LTT`. Used in nicknames and the cooldown ledger.
    pub prefix: String,
    /// Discord role granted to holders of this rank.
    pub role_id: RoleId,
    /// Name of the permission set in `BotConfig::permission_sets`.
    pub permission_set: String,
    /// Highest rank holders of this rank may promote others into.
    ///
    /// `None` allows promoting to any rank strictly below this one.
    #[serde(default)]
    pub max_promote_to: Option<String>,
}

/// Requirements for being promoted into a rank.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RankRequirement {
    /// Days a member must wait in this rank before their next promotion.
    ///
    /// Fractional values are allowed; the cooldown is stored with millisecond precision.
    pub cooldown_days: f64,
    /// Point balance needed to be promoted into this rank.
    pub min_points: i32,
}

impl RankRequirement {
    /// Cooldown written after a promotion into the rank, if any.
    ///
    /// # Returns
    /// - `Some(Duration)` - `cooldown_days * 86_400_000` milliseconds
    /// - `None` - The rank has no cooldown
    pub fn cooldown(&self) -> Option<Duration> {
        if self.cooldown_days > 0.0 {
            Some(Duration::milliseconds(
                (self.cooldown_days * MS_PER_DAY).round() as i64,
            ))
        } else {
            None
        }
    }
}

/// Ordered rank hierarchy with per-rank requirements.
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    ranks: Vec<Rank>,
    requirements: HashMap<String, RankRequirement>,
}

impl RankTable {
    /// Creates a rank table from ranks ordered highest authority first.
    ///
    /// Callers are expected to have validated prefix uniqueness; see `BotConfig::load`.
    pub fn new(ranks: Vec<Rank>, requirements: HashMap<String, RankRequirement>) -> Self {
        Self {
            ranks,
            requirements,
        }
    }

    /// All ranks, highest authority first.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn get(&self, prefix: &str) -> Option<&Rank> {
        self.ranks.iter().find(|rank| rank.prefix == prefix)
    }

    /// Position of `prefix` in the hierarchy, 0 being the highest rank.
    pub fn index_of(&self, prefix: &str) -> Option<usize> {
        self.ranks.iter().position(|rank| rank.prefix == prefix)
    }

    pub fn is_valid(&self, prefix: &str) -> bool {
        self.index_of(prefix).is_some()
    }

    /// Rank directly above `prefix`, the target of a promotion.
    ///
    /// # Returns
    /// - `Some(&Rank)` - The next higher rank
    /// - `None` - `prefix` is the top rank or unknown
    pub fn next_higher(&self, prefix: &str) -> Option<&Rank> {
        match self.index_of(prefix)? {
            0 => None,
            index => self.ranks.get(index - 1),
        }
    }

    /// Rank directly below `prefix`, the target of a demotion.
    ///
    /// # Returns
    /// - `Some(&Rank)` - The next lower rank
    /// - `None` - `prefix` is the bottom rank or unknown
    pub fn next_lower(&self, prefix: &str) -> Option<&Rank> {
        let index = self.index_of(prefix)?;
        self.ranks.get(index + 1)
    }

    /// Highest rank whose role appears in `role_ids`.
    ///
    /// Members occasionally hold more than one rank role after a manual edit; the first
    /// match in table order wins.
    pub fn highest_held(&self, role_ids: &[RoleId]) -> Option<&Rank> {
        self.ranks
            .iter()
            .find(|rank| role_ids.contains(&rank.role_id))
    }

    /// Requirement for promotion into `prefix`, if one is configured.
    pub fn requirement(&self, prefix: &str) -> Option<&RankRequirement> {
        self.requirements.get(prefix)
    }

    pub fn requirements(&self) -> &HashMap<String, RankRequirement> {
        &self.requirements
    }
}
