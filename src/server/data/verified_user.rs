//! Verified user repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::{
    error::AppError,
    model::verification::{UpsertVerifiedUserParam, VerifiedUser},
};

pub struct VerifiedUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerifiedUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<VerifiedUser>, AppError> {
        let entity = entity::prelude::VerifiedUser::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        entity.map(VerifiedUser::from_entity).transpose()
    }

    pub async fn find_by_roblox_id(&self, roblox_id: i64) -> Result<Option<VerifiedUser>, AppError> {
        let entity = entity::prelude::VerifiedUser::find()
            .filter(entity::verified_user::Column::RobloxId.eq(roblox_id))
            .one(self.db)
            .await?;

        entity.map(VerifiedUser::from_entity).transpose()
    }

    /// Links a Discord account to a Roblox account.
    ///
    /// Re-verifying replaces the previous link for the Discord account. Callers must
    /// check that the Roblox account is not linked elsewhere first; the unique index on
    /// `roblox_id` rejects the insert otherwise.
    ///
    /// # Returns
    /// - `Ok(VerifiedUser)` - The stored link
    /// - `Err(AppError)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertVerifiedUserParam) -> Result<VerifiedUser, AppError> {
        let entity = entity::prelude::VerifiedUser::insert(entity::verified_user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            roblox_id: ActiveValue::Set(param.roblox_id),
            roblox_username: ActiveValue::Set(param.roblox_username),
            roblox_display_name: ActiveValue::Set(param.roblox_display_name),
            verified_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::verified_user::Column::DiscordId)
                .update_columns([
                    entity::verified_user::Column::RobloxId,
                    entity::verified_user::Column::RobloxUsername,
                    entity::verified_user::Column::RobloxDisplayName,
                    entity::verified_user::Column::VerifiedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        VerifiedUser::from_entity(entity)
    }

    /// Removes the verification link for a Discord account.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of links removed (0 or 1)
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, discord_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::VerifiedUser::delete_by_id(discord_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
