use super::*;

/// Tests removing a link.
///
/// Expected: one row removed and the link no longer found
#[tokio::test]
async fn removes_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VerifiedUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_verified_user(db, "123456789012345678").await?;

    let repo = VerifiedUserRepository::new(db);

    assert_eq!(repo.delete(123456789012345678).await?, 1);
    assert!(repo.find_by_discord_id(123456789012345678).await?.is_none());
    assert_eq!(repo.delete(123456789012345678).await?, 0);

    Ok(())
}
