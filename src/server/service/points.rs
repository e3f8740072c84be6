//! Manual point adjustments.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user_profile::UserProfileRepository,
    error::AppError,
    model::{config::PointsConfig, user_profile::UserProfile},
};

pub struct PointsService<'a> {
    db: &'a DatabaseConnection,
    bounds: PointsConfig,
}

impl<'a> PointsService<'a> {
    pub fn new(db: &'a DatabaseConnection, bounds: PointsConfig) -> Self {
        Self { db, bounds }
    }

    /// Adds `delta` to a member's balance, creating their profile if needed.
    ///
    /// The balance never drops below zero.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the member
    /// - `username` - Current username, stored on the profile
    /// - `delta` - Points to add, negative to remove
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Profile with the new balance
    /// - `Err(AppError::BadRequest)` - `delta` is outside the configured bounds
    /// - `Err(AppError::DbErr)` - Database error during the update
    pub async fn adjust(
        &self,
        user_id: u64,
        username: &str,
        delta: i32,
    ) -> Result<UserProfile, AppError> {
        if delta < self.bounds.min_adjustment || delta > self.bounds.max_adjustment {
            return Err(AppError::BadRequest(format!(
                "Amount must be between {} and {}",
                self.bounds.min_adjustment, self.bounds.max_adjustment
            )));
        }

        let profile = UserProfileRepository::new(self.db)
            .adjust_points(user_id, username, delta)
            .await?;

        tracing::info!(
            "Adjusted points of {} by {}, new balance {}",
            user_id,
            delta,
            profile.points
        );

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests an adjustment within bounds.
    ///
    /// Expected: Ok with the balance increased
    #[tokio::test]
    async fn adds_points_within_bounds() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::UserProfile)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_profile_with_points(db, "123456789012345678", 20).await?;

        let service = PointsService::new(db, PointsConfig::default());
        let profile = service.adjust(123456789012345678, "member", 500).await?;

        assert_eq!(profile.points, 520);

        Ok(())
    }

    /// Tests adjustments outside the configured bounds.
    ///
    /// Expected: Err(BadRequest) and the balance unchanged
    #[tokio::test]
    async fn rejects_out_of_bounds_amount() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::UserProfile)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_profile_with_points(db, "123456789012345678", 20).await?;

        let service = PointsService::new(
            db,
            PointsConfig {
                min_adjustment: -10,
                max_adjustment: 10,
            },
        );

        assert!(matches!(
            service.adjust(123456789012345678, "member", 11).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.adjust(123456789012345678, "member", -11).await,
            Err(AppError::BadRequest(_))
        ));

        let points = UserProfileRepository::new(db)
            .get_points(123456789012345678)
            .await?;
        assert_eq!(points, 20);

        Ok(())
    }

    /// Tests removing more points than the member has.
    ///
    /// Expected: balance floored at zero
    #[tokio::test]
    async fn floors_balance_at_zero() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::UserProfile)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_profile_with_points(db, "123456789012345678", 30).await?;

        let service = PointsService::new(db, PointsConfig::default());
        let profile = service.adjust(123456789012345678, "member", -100).await?;

        assert_eq!(profile.points, 0);

        Ok(())
    }
}
