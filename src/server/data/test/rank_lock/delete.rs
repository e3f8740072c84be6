use super::*;

/// Tests removing a lock.
///
/// Expected: one row removed, then none on a second attempt
#[tokio::test]
async fn removes_lock_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankLock)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_rank_lock(db, "123456789012345678", "SGT").await?;

    let repo = RankLockRepository::new(db);

    assert_eq!(repo.delete(123456789012345678, "SGT").await?, 1);
    assert_eq!(repo.delete(123456789012345678, "SGT").await?, 0);
    assert!(repo.find(123456789012345678, "SGT").await?.is_none());

    Ok(())
}
