use super::*;

/// Tests listing participants for one event.
///
/// Expected: rows of that event only, in insertion order
#[tokio::test]
async fn lists_participants_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_event(db, "123456789012345678").await?;
    let other = factory::create_event(db, "123456789012345678").await?;
    factory::create_participant(db, event.id, "300000000000000001", 5).await?;
    factory::create_participant(db, event.id, "300000000000000002", 5).await?;
    factory::create_participant(db, other.id, "300000000000000003", 5).await?;

    let repo = EventParticipantRepository::new(db);
    let participants = repo.get_by_event(event.id).await?;

    let ids: Vec<u64> = participants.iter().map(|p| p.user_id).collect();
    assert_eq!(ids, vec![300000000000000001, 300000000000000002]);

    Ok(())
}
