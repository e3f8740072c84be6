//! Rank tables and bot configurations used across tests.

use serenity::all::RoleId;
use std::collections::HashMap;

use crate::server::model::{
    config::BotConfig,
    rank::{Rank, RankRequirement, RankTable},
};

pub const GEN_ROLE: u64 = 1000;
pub const CPT_ROLE: u64 = 1001;
pub const SSG_ROLE: u64 = 1002;
pub const SGT_ROLE: u64 = 1003;
pub const JSG_ROLE: u64 = 1004;
pub const PVT_ROLE: u64 = 1005;
pub const VERIFIED_ROLE: u64 = 2000;
pub const NCO_CORPS_ROLE: u64 = 3000;
pub const TRAINING_DEPT_ROLE: u64 = 4000;

/// Builds a rank using the `officer` permission set.
pub fn rank(name: &str, prefix: &str, role_id: u64, ceiling: Option<&str>) -> Rank {
    Rank {
        name: name.to_string(),
        prefix: prefix.to_string(),
        role_id: RoleId::new(role_id),
        permission_set: "officer".to_string(),
        max_promote_to: ceiling.map(str::to_string),
    }
}

/// Four rung officer ladder `[CMD, CPT, LTT, JLT]`.
///
/// `LTT` requires 49 days and 140 points.
pub fn ladder() -> RankTable {
    let ranks = vec![
        rank("Commander", "CMD", 1, None),
        rank("Captain", "CPT", 2, None),
        rank("Lieutenant", "LTT", 3, None),
        rank("Junior Lieutenant", "JLT", 4, None),
    ];
    let requirements = HashMap::from([
        (
            "CMD".to_string(),
            RankRequirement {
                cooldown_days: 7.0,
                min_points: 250,
            },
        ),
        (
            "CPT".to_string(),
            RankRequirement {
                cooldown_days: 7.0,
                min_points: 200,
            },
        ),
        (
            "LTT".to_string(),
            RankRequirement {
                cooldown_days: 49.0,
                min_points: 140,
            },
        ),
        (
            "JLT".to_string(),
            RankRequirement {
                cooldown_days: 5.0,
                min_points: 150,
            },
        ),
    ]);

    RankTable::new(ranks, requirements)
}

/// Bot configuration whose rank table is `ladder()`, with permissive permission sets.
pub fn ladder_config() -> BotConfig {
    let mut config = bot_config();
    config.ranks = ladder();
    config
}

/// Small but complete bot configuration.
///
/// Ranks, highest first: `GEN` (hicom), `CPT` (officer, ceiling `SGT`), `SSG`, `SGT`
/// (nco, ceiling `JSG`), `JSG`, `PVT` (enlisted). The `NCO Corps` linked role is granted
/// to holders of `SSG`, `SGT` or `JSG`. `academy` events are reserved for the training
/// department.
pub fn bot_config() -> BotConfig {
    let json = format!(
        r#"{{
            "ranks": [
                {{ "name": "General", "prefix": "GEN", "role_id": "{GEN_ROLE}", "permission_set": "hicom" }},
                {{ "name": "Captain", "prefix": "CPT", "role_id": "{CPT_ROLE}", "permission_set": "officer", "max_promote_to": "SGT" }},
                {{ "name": "Staff Sergeant", "prefix": "SSG", "role_id": "{SSG_ROLE}", "permission_set": "nco" }},
                {{ "name": "Sergeant", "prefix": "SGT", "role_id": "{SGT_ROLE}", "permission_set": "nco", "max_promote_to": "JSG" }},
                {{ "name": "Junior Sergeant", "prefix": "JSG", "role_id": "{JSG_ROLE}", "permission_set": "nco" }},
                {{ "name": "Private", "prefix": "PVT", "role_id": "{PVT_ROLE}", "permission_set": "enlisted" }}
            ],
            "requirements": {{
                "CPT": {{ "cooldown_days": 7, "min_points": 200 }},
                "SSG": {{ "cooldown_days": 3, "min_points": 90 }},
                "SGT": {{ "cooldown_days": 2, "min_points": 75 }},
                "JSG": {{ "cooldown_days": 2, "min_points": 60 }},
                "PVT": {{ "cooldown_days": 0, "min_points": 0 }}
            }},
            "permission_sets": {{
                "hicom": {{ "type": ".INCLUDE", "commands": ["*"] }},
                "officer": {{ "type": ".EXCEPT", "commands": ["sync-linked-roles"] }},
                "nco": {{ "type": ".INCLUDE", "commands": ["promote", "profile", "start-event", "end-event"] }},
                "enlisted": {{ "type": ".INCLUDE", "commands": ["profile", "verify"] }}
            }},
            "linked_roles": [
                {{
                    "parent_role_id": "{NCO_CORPS_ROLE}",
                    "parent_role_name": "NCO Corps",
                    "child_role_ids": ["{SSG_ROLE}", "{SGT_ROLE}", "{JSG_ROLE}"]
                }}
            ],
            "event_types": {{
                "patrol": {{ "base_per_hour": 10, "bonus_per_30_min": 5, "max_points": 40, "description": "Patrol" }},
                "training": {{ "base_per_hour": 8, "bonus_per_30_min": 4, "max_points": 30, "description": "Training" }},
                "academy": {{ "base_per_hour": 6, "bonus_per_30_min": 3, "max_points": 24, "description": "Academy Training", "department_role_id": "{TRAINING_DEPT_ROLE}" }}
            }},
            "points": {{ "min_adjustment": -100, "max_adjustment": 100 }}
        }}"#
    );

    match BotConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => panic!("test bot config is invalid: {}", e),
    }
}
