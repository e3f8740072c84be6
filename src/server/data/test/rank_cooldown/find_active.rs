use super::*;

/// Tests that the active cooldown ending last is returned.
///
/// Verifies ordering when several unexpired records exist for the same rank.
///
/// Expected: Ok(Some) with the later expiry
#[tokio::test]
async fn returns_latest_unexpired_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = "123456789012345678";
    let later = Utc::now() + Duration::days(5);
    factory::create_cooldown(db, user, "SGT").await?;
    factory::rank_cooldown::RankCooldownFactory::new(db, user, "SGT")
        .cooldown_until(later)
        .build()
        .await?;

    let repo = RankCooldownRepository::new(db);
    let found = repo
        .find_active(123456789012345678, "SGT", Utc::now())
        .await?
        .unwrap();

    assert!((found.cooldown_until - later).num_seconds().abs() < 1);

    Ok(())
}

/// Tests that expired records and records for other ranks are ignored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_expired_and_other_ranks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = "123456789012345678";
    factory::rank_cooldown::RankCooldownFactory::new(db, user, "SGT")
        .expired(Duration::hours(1))
        .build()
        .await?;
    factory::create_cooldown(db, user, "JSG").await?;

    let repo = RankCooldownRepository::new(db);
    let found = repo
        .find_active(123456789012345678, "SGT", Utc::now())
        .await?;

    assert!(found.is_none());

    Ok(())
}
