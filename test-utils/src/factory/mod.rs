//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let profile = factory::create_profile(&db).await?;
//! let cooldown = factory::create_cooldown(&db, &profile.discord_id, "LTT").await?;
//!
//! let profile = factory::user_profile::UserProfileFactory::new(&db)
//!     .discord_id("123456789012345678")
//!     .points(140)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user_profile` - Point balance holders
//! - `rank_cooldown` - Cooldown ledger records
//! - `rank_lock` - Administrative rank pins
//! - `event` - Hosted events
//! - `event_participant` - Event attendance rows
//! - `verified_user` - Discord to Roblox links
//! - `oauth_state` - Pending verification state tokens
//! - `helpers` - ID generation shared by all factories

pub mod event;
pub mod event_participant;
pub mod helpers;
pub mod oauth_state;
pub mod rank_cooldown;
pub mod rank_lock;
pub mod user_profile;
pub mod verified_user;

pub use event::create_event;
pub use event_participant::create_participant;
pub use oauth_state::create_oauth_state;
pub use rank_cooldown::create_cooldown;
pub use rank_lock::create_rank_lock;
pub use user_profile::{create_profile, create_profile_with_points};
pub use verified_user::create_verified_user;
