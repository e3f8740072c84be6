use super::*;

/// Tests finding a lock at the member's rank.
///
/// Expected: Ok(Some) for the locked rank, Ok(None) for any other rank
#[tokio::test]
async fn finds_lock_for_rank_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankLock)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::rank_lock::RankLockFactory::new(db, "123456789012345678", "SGT")
        .reason("Inactivity")
        .build()
        .await?;

    let repo = RankLockRepository::new(db);

    let lock = repo.find(123456789012345678, "SGT").await?.unwrap();
    assert_eq!(lock.reason, "Inactivity");
    assert!(repo.find(123456789012345678, "JSG").await?.is_none());
    assert_eq!(repo.find_by_user(123456789012345678).await?.len(), 1);

    Ok(())
}
