//! Domain models and parameter types.
//!
//! Repositories convert SeaORM entities into these types at the data layer boundary so
//! services and bot commands never handle entity models directly. Configuration tables
//! loaded at startup (ranks, requirements, permission sets, linked roles, event types)
//! also live here.

pub mod api;
pub mod config;
pub mod cooldown;
pub mod event;
pub mod linked_role;
pub mod rank;
pub mod rank_lock;
pub mod ranking;
pub mod user_profile;
pub mod verification;
