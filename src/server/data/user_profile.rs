//! User profile repository.
//!
//! Profiles hold each member's point balance. A profile is created lazily the first
//! time a member is awarded points, verifies, or has points adjusted.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    TransactionSession, TransactionTrait,
};

use crate::server::{error::AppError, model::user_profile::UserProfile};

/// Repository providing database operations for member profiles.
///
/// Works on a plain connection or inside a caller's transaction.
pub struct UserProfileRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> UserProfileRepository<'a, C> {
    /// Creates a new UserProfileRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    ///
    /// # Returns
    /// - `UserProfileRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a profile by Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(UserProfile))` - Profile found
    /// - `Ok(None)` - Member has no profile yet
    /// - `Err(AppError)` - Database error or corrupt stored ID
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<UserProfile>, AppError> {
        let entity = entity::prelude::UserProfile::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(UserProfile::from_entity).transpose()
    }

    /// Gets a member's point balance.
    ///
    /// Members without a profile have zero points.
    pub async fn get_points(&self, user_id: u64) -> Result<i32, DbErr> {
        let entity = entity::prelude::UserProfile::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(|profile| profile.points).unwrap_or(0))
    }

    /// Creates a profile or refreshes the stored username of an existing one.
    ///
    /// The point balance of an existing profile is left untouched.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `username` - Current Discord username
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - The created or updated profile
    /// - `Err(AppError)` - Database error during upsert
    pub async fn upsert(&self, user_id: u64, username: &str) -> Result<UserProfile, AppError> {
        let now = Utc::now();
        let entity = entity::prelude::UserProfile::insert(entity::user_profile::ActiveModel {
            discord_id: ActiveValue::Set(user_id.to_string()),
            username: ActiveValue::Set(username.to_string()),
            points: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::user_profile::Column::DiscordId)
                .update_columns([
                    entity::user_profile::Column::Username,
                    entity::user_profile::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        UserProfile::from_entity(entity)
    }

    /// Adds `delta` to a member's balance, creating the profile if needed.
    ///
    /// The resulting balance is floored at zero whether the profile is created or
    /// updated. The read and write run in one transaction so concurrent adjustments
    /// to the same member serialize; inside a caller's transaction this is a savepoint.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `username` - Current Discord username, stored on the profile
    /// - `delta` - Points to add; negative values subtract
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Profile with the new balance
    /// - `Err(AppError)` - Database error during the transaction
    pub async fn adjust_points(
        &self,
        user_id: u64,
        username: &str,
        delta: i32,
    ) -> Result<UserProfile, AppError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let existing = entity::prelude::UserProfile::find_by_id(user_id.to_string())
            .one(&txn)
            .await?;

        let entity = match existing {
            Some(profile) => {
                let points = profile.points.saturating_add(delta).max(0);
                let mut active: entity::user_profile::ActiveModel = profile.into();
                active.points = ActiveValue::Set(points);
                active.username = ActiveValue::Set(username.to_string());
                active.updated_at = ActiveValue::Set(now);
                active.update(&txn).await?
            }
            None => {
                entity::user_profile::ActiveModel {
                    discord_id: ActiveValue::Set(user_id.to_string()),
                    username: ActiveValue::Set(username.to_string()),
                    points: ActiveValue::Set(delta.max(0)),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        UserProfile::from_entity(entity)
    }

    /// Deletes a member's profile.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted (0 or 1)
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::UserProfile::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
