//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models so the service and bot layers never see entities. Discord IDs are `u64`
//! everywhere above this layer and stored as strings below it.

pub mod event;
pub mod event_participant;
pub mod oauth_state;
pub mod rank_cooldown;
pub mod rank_lock;
pub mod user_profile;
pub mod verified_user;

#[cfg(test)]
mod test;
