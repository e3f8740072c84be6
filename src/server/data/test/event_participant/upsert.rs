use super::*;

/// Tests recording attendance for a new participant.
///
/// Expected: Ok(EventParticipant) with the given points
#[tokio::test]
async fn inserts_new_participant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_event(db, "123456789012345678").await?;

    let repo = EventParticipantRepository::new(db);
    let participant = repo.upsert(event.id, 223456789012345678, 12).await?;

    assert_eq!(participant.event_id, event.id);
    assert_eq!(participant.user_id, 223456789012345678);
    assert_eq!(participant.points, 12);

    Ok(())
}

/// Tests that recording the same participant twice replaces the points.
///
/// Expected: a single row holding the latest value
#[tokio::test]
async fn replaces_existing_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_event(db, "123456789012345678").await?;
    factory::create_participant(db, event.id, "223456789012345678", 5).await?;

    let repo = EventParticipantRepository::new(db);
    repo.upsert(event.id, 223456789012345678, 20).await?;

    let participants = repo.get_by_event(event.id).await?;
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].points, 20);

    Ok(())
}
