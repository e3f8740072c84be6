//! OAuth state token repository.
//!
//! A state token ties an OAuth redirect back to the Discord member who ran `/verify`.
//! Tokens are single use: looking one up for a callback deletes it.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::{error::AppError, model::verification::OauthState};

pub struct OauthStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OauthStateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new state token.
    ///
    /// # Arguments
    /// - `state_token` - Random token embedded in the authorise URL
    /// - `discord_id` - Member the verification belongs to
    /// - `discord_user_tag` - Member's tag for display, if known
    /// - `expires_at` - Time after which the token is rejected
    pub async fn create(
        &self,
        state_token: &str,
        discord_id: u64,
        discord_user_tag: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<OauthState, AppError> {
        let entity = entity::oauth_state::ActiveModel {
            state_token: ActiveValue::Set(state_token.to_string()),
            discord_id: ActiveValue::Set(discord_id.to_string()),
            discord_user_tag: ActiveValue::Set(discord_user_tag),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        OauthState::from_entity(entity)
    }

    /// Looks up and deletes a state token.
    ///
    /// Expired tokens are deleted as well but not returned.
    ///
    /// # Returns
    /// - `Ok(Some(OauthState))` - Token existed and had not expired at `now`
    /// - `Ok(None)` - Token unknown or expired
    /// - `Err(AppError)` - Database error during lookup or delete
    pub async fn consume(
        &self,
        state_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OauthState>, AppError> {
        let Some(entity) = entity::prelude::OauthState::find_by_id(state_token.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        entity::prelude::OauthState::delete_by_id(state_token.to_string())
            .exec(self.db)
            .await?;

        if entity.expires_at <= now {
            return Ok(None);
        }

        OauthState::from_entity(entity).map(Some)
    }

    pub async fn delete_by_user(&self, discord_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::OauthState::delete_many()
            .filter(entity::oauth_state::Column::DiscordId.eq(discord_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes tokens that expired at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::OauthState::delete_many()
            .filter(entity::oauth_state::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
