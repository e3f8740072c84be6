use super::*;

/// Tests that upserting an existing profile refreshes the username only.
///
/// Expected: username updated, points unchanged
#[tokio::test]
async fn updates_username_and_keeps_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user_profile::UserProfileFactory::new(db)
        .discord_id("123456789012345678")
        .username("oldname")
        .points(40)
        .build()
        .await?;

    let repo = UserProfileRepository::new(db);
    let profile = repo.upsert(123456789012345678, "newname").await?;

    assert_eq!(profile.username, "newname");
    assert_eq!(profile.points, 40);

    Ok(())
}

/// Tests that upserting an unknown member creates a zero balance profile.
///
/// Expected: Ok(UserProfile) with 0 points
#[tokio::test]
async fn creates_missing_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProfileRepository::new(db);
    let profile = repo.upsert(123456789012345678, "recruit").await?;

    assert_eq!(profile.discord_id, 123456789012345678);
    assert_eq!(profile.points, 0);
    assert!(repo.find_by_discord_id(123456789012345678).await?.is_some());

    Ok(())
}
