pub use super::event::Entity as Event;
pub use super::event_participant::Entity as EventParticipant;
pub use super::oauth_state::Entity as OauthState;
pub use super::rank_cooldown::Entity as RankCooldown;
pub use super::rank_lock::Entity as RankLock;
pub use super::user_profile::Entity as UserProfile;
pub use super::verified_user::Entity as VerifiedUser;
