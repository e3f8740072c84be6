mod event;
mod event_participant;
mod oauth_state;
mod rank_cooldown;
mod rank_lock;
mod user_profile;
mod verified_user;
