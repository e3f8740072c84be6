use super::*;

/// Tests counting the events a member attended.
///
/// Expected: rows across every event are counted for that member only
#[tokio::test]
async fn counts_attendance_across_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_event(db, "123456789012345678").await?;
    let second = factory::create_event(db, "223456789012345678").await?;
    factory::create_participant(db, first.id, "300000000000000001", 5).await?;
    factory::create_participant(db, second.id, "300000000000000001", 10).await?;
    factory::create_participant(db, second.id, "300000000000000002", 10).await?;

    let repo = EventParticipantRepository::new(db);

    assert_eq!(repo.count_by_user(300000000000000001).await?, 2);
    assert_eq!(repo.count_by_user(300000000000000009).await?, 0);

    Ok(())
}
