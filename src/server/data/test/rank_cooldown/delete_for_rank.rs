use super::*;

/// Tests deleting a member's cooldowns for a single rank.
///
/// Expected: only the matching rank's records are removed
#[tokio::test]
async fn deletes_only_matching_rank() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = "123456789012345678";
    factory::create_cooldown(db, user, "SGT").await?;
    factory::create_cooldown(db, user, "SGT").await?;
    factory::create_cooldown(db, user, "JSG").await?;

    let repo = RankCooldownRepository::new(db);
    let deleted = repo.delete_for_rank(123456789012345678, "SGT").await?;

    assert_eq!(deleted, 2);
    assert!(repo
        .find_active(123456789012345678, "JSG", Utc::now())
        .await?
        .is_some());

    Ok(())
}

/// Tests deleting every cooldown a member holds.
///
/// Expected: other members' cooldowns survive
#[tokio::test]
async fn delete_by_user_leaves_other_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_cooldown(db, "123456789012345678", "SGT").await?;
    factory::create_cooldown(db, "123456789012345678", "JSG").await?;
    factory::create_cooldown(db, "223456789012345678", "SGT").await?;

    let repo = RankCooldownRepository::new(db);

    assert_eq!(repo.delete_by_user(123456789012345678).await?, 2);
    assert!(repo
        .find_active(223456789012345678, "SGT", Utc::now())
        .await?
        .is_some());

    Ok(())
}
