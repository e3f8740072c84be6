use super::*;

/// Tests creating a rank lock.
///
/// Expected: Ok(RankLock) with the supplied reason and administrator
#[tokio::test]
async fn creates_lock() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankLock)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RankLockRepository::new(db);
    let lock = repo
        .create(CreateRankLockParam {
            user_id: 123456789012345678,
            rank: "SGT".to_string(),
            reason: "Under investigation".to_string(),
            locked_by: 223456789012345678,
        })
        .await?;

    assert_eq!(lock.rank, "SGT");
    assert_eq!(lock.reason, "Under investigation");
    assert_eq!(lock.locked_by, 223456789012345678);

    Ok(())
}
