//! OAuth state factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating pending OAuth state tokens.
///
/// Defaults to a token expiring ten minutes from now.
pub struct OauthStateFactory<'a> {
    db: &'a DatabaseConnection,
    state_token: String,
    discord_id: String,
    expires_at: DateTime<Utc>,
}

impl<'a> OauthStateFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, discord_id: &str) -> Self {
        Self {
            db,
            state_token: format!("state{:058}", next_id()),
            discord_id: discord_id.to_string(),
            expires_at: Utc::now() + Duration::minutes(10),
        }
    }

    pub fn state_token(mut self, state_token: impl Into<String>) -> Self {
        self.state_token = state_token.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub async fn build(self) -> Result<entity::oauth_state::Model, DbErr> {
        entity::oauth_state::ActiveModel {
            state_token: ActiveValue::Set(self.state_token),
            discord_id: ActiveValue::Set(self.discord_id),
            discord_user_tag: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unexpired state token for `discord_id`.
pub async fn create_oauth_state(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<entity::oauth_state::Model, DbErr> {
    OauthStateFactory::new(db, discord_id).build().await
}
