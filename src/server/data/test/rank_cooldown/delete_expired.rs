use super::*;

/// Tests purging expired cooldowns.
///
/// Expected: only records that ended before now are removed
#[tokio::test]
async fn purges_only_expired_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = "123456789012345678";
    factory::rank_cooldown::RankCooldownFactory::new(db, user, "SGT")
        .expired(Duration::days(2))
        .build()
        .await?;
    factory::create_cooldown(db, user, "JSG").await?;

    let repo = RankCooldownRepository::new(db);
    let purged = repo.delete_expired(Utc::now()).await?;

    assert_eq!(purged, 1);
    assert!(repo
        .find_active(123456789012345678, "JSG", Utc::now())
        .await?
        .is_some());

    Ok(())
}
