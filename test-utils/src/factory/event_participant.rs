//! Event participant factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an attendance row for `user_discord_id` on `event_id` with the given points.
///
/// # Arguments
/// - `db` - Database connection
/// - `event_id` - ID of an existing event
/// - `user_discord_id` - Discord ID of the participant
/// - `points` - Points recorded for the participant
///
/// # Returns
/// - `Ok(Model)` - The created participant row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_participant(
    db: &DatabaseConnection,
    event_id: i32,
    user_discord_id: &str,
    points: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    entity::event_participant::ActiveModel {
        event_id: ActiveValue::Set(event_id),
        user_discord_id: ActiveValue::Set(user_discord_id.to_string()),
        points: ActiveValue::Set(points),
        ..Default::default()
    }
    .insert(db)
    .await
}
