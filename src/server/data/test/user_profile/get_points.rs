use super::*;

/// Tests reading the balance of a member with a profile.
///
/// Expected: Ok(points) matching the stored balance
#[tokio::test]
async fn returns_stored_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_profile_with_points(db, "123456789012345678", 125).await?;

    let repo = UserProfileRepository::new(db);
    let points = repo.get_points(123456789012345678).await?;

    assert_eq!(points, 125);

    Ok(())
}

/// Tests reading the balance of a member who has never earned points.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserProfile)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserProfileRepository::new(db);

    assert_eq!(repo.get_points(999999999999999999).await?, 0);

    Ok(())
}
