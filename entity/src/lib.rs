//! SeaORM entity models for the CASF bot database.

pub mod prelude;

pub mod event;
pub mod event_participant;
pub mod oauth_state;
pub mod rank_cooldown;
pub mod rank_lock;
pub mod user_profile;
pub mod verified_user;
