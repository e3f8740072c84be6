use super::*;

/// Tests adding points to an existing profile.
///
/// Expected: balance increased by the delta
#[tokio::test]
async fn increments_existing_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_profile_with_points(db, "123456789012345678", 50).await?;

    let repo = UserProfileRepository::new(db);
    let profile = repo.adjust_points(123456789012345678, "member", 25).await?;

    assert_eq!(profile.points, 75);

    Ok(())
}

/// Tests that a large deduction from an existing profile floors at zero.
///
/// Verifies the update path applies the same floor as profile creation.
///
/// Expected: balance of 0 rather than -450
#[tokio::test]
async fn floors_update_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_profile_with_points(db, "123456789012345678", 50).await?;

    let repo = UserProfileRepository::new(db);
    let profile = repo.adjust_points(123456789012345678, "member", -500).await?;

    assert_eq!(profile.points, 0);
    assert_eq!(repo.get_points(123456789012345678).await?, 0);

    Ok(())
}

/// Tests that a deduction for a member without a profile creates one at zero.
///
/// Expected: new profile with 0 points
#[tokio::test]
async fn floors_creation_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProfileRepository::new(db);
    let profile = repo.adjust_points(123456789012345678, "member", -20).await?;

    assert_eq!(profile.points, 0);
    assert_eq!(profile.username, "member");

    Ok(())
}
